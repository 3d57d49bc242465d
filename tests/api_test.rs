use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use aula_notify_backend::api::router;
use aula_notify_backend::db;
use aula_notify_backend::models::{NuevoUsuario, Role};
use aula_notify_backend::notify::NoopNotifier;
use aula_notify_backend::state::AppState;

/// Router over a fresh in-memory store, plus the id of a bootstrapped admin.
async fn setup() -> (Router, SqlitePool, String) {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let admin = db::usuarios::insert(
        &pool,
        NuevoUsuario {
            email: "admin@universidad.edu".to_string(),
            nombre: "Admin".to_string(),
            apellido: None,
            telefono: None,
            role: Role::Admin,
        },
    )
    .await
    .expect("Failed to insert admin");

    let app = router(AppState {
        db: pool.clone(),
        notifier: Arc::new(NoopNotifier),
    });

    (app, pool, admin.id)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, user_id: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse body")
}

async fn crear_materia(app: &Router, admin: &str, codigo: &str) -> Value {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/materias",
            Some(admin),
            json!({ "codigo": codigo, "nombre": format!("Materia {codigo}"), "creditos": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn crear_aula(app: &Router, admin: &str, codigo: &str) -> Value {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/aulas",
            Some(admin),
            json!({
                "codigo": codigo,
                "nombre": format!("Aula {codigo}"),
                "ubicacion": "Edificio Central",
                "capacidad": 120
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_responde_ok() {
    let (app, _pool, _admin) = setup().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn crear_asignar_y_cancelar_una_clase() {
    let (app, _pool, admin) = setup().await;
    let materia = crear_materia(&app, &admin, "MAT101").await;
    let aula = crear_aula(&app, &admin, "A101").await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia["id"],
                "aula_id": aula["id"],
                "fecha": "2024-01-15",
                "hora_inicio": "08:00",
                "hora_fin": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let clase = body_json(response).await;
    let clase_id = clase["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get(&format!("/clases/{clase_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detalle = body_json(response).await;
    assert_eq!(detalle["estado_visible"], "asignada");
    assert_eq!(detalle["materia_codigo"], "MAT101");
    assert_eq!(detalle["aula_codigo"], "A101");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            &format!("/clases/{clase_id}/cancelar"),
            Some(&admin),
            json!({ "motivo": "Paro docente" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/clases/{clase_id}")))
        .await
        .unwrap();
    let detalle = body_json(response).await;
    // El aula sigue asignada, pero cancelada gana.
    assert_eq!(detalle["estado_visible"], "cancelada");
    assert_eq!(detalle["motivo_cancelacion"], "Paro docente");
}

#[tokio::test]
async fn sin_aula_la_clase_queda_por_asignar() {
    let (app, _pool, admin) = setup().await;
    let materia = crear_materia(&app, &admin, "FIS201").await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia["id"],
                "fecha": "2024-01-15",
                "hora_inicio": "08:00",
                "hora_fin": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let clase = body_json(response).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/clases/{}", clase["id"].as_str().unwrap())))
        .await
        .unwrap();
    let detalle = body_json(response).await;
    assert_eq!(detalle["estado_visible"], "por_asignar");
}

#[tokio::test]
async fn doble_reserva_devuelve_409_con_la_materia_en_conflicto() {
    let (app, _pool, admin) = setup().await;
    let materia_a = crear_materia(&app, &admin, "MAT101").await;
    let materia_b = crear_materia(&app, &admin, "FIS201").await;
    let aula = crear_aula(&app, &admin, "A101").await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia_a["id"],
                "aula_id": aula["id"],
                "fecha": "2024-01-15",
                "hora_inicio": "08:00",
                "hora_fin": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Solape parcial, no solo el mismo inicio.
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia_b["id"],
                "aula_id": aula["id"],
                "fecha": "2024-01-15",
                "hora_inicio": "09:00",
                "hora_fin": "11:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let cuerpo = body_json(response).await;
    let mensaje = cuerpo["error"].as_str().unwrap();
    assert!(mensaje.contains("A101"), "mensaje: {mensaje}");
    assert!(mensaje.contains("MAT101"), "mensaje: {mensaje}");
}

#[tokio::test]
async fn codigos_invalidos_devuelven_400() {
    let (app, _pool, admin) = setup().await;

    for codigo in ["101A", "AA101"] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/aulas",
                Some(&admin),
                json!({
                    "codigo": codigo,
                    "nombre": "Aula X",
                    "ubicacion": "Edificio Central",
                    "capacidad": 50
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "codigo {codigo}");
    }

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/materias",
            Some(&admin),
            json!({ "codigo": "M1", "nombre": "Materia X" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mutaciones_requieren_sesion_de_admin() {
    let (app, pool, _admin) = setup().await;

    let body = json!({ "codigo": "MAT101", "nombre": "Matemática I" });

    // Sin sesión.
    let response = app
        .clone()
        .oneshot(send_json("POST", "/materias", None, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Con sesión de suscriptor.
    let estudiante = db::usuarios::insert(
        &pool,
        NuevoUsuario {
            email: "estudiante@universidad.edu".to_string(),
            nombre: "Juan".to_string(),
            apellido: None,
            telefono: None,
            role: Role::Suscriptor,
        },
    )
    .await
    .unwrap();
    let response = app
        .clone()
        .oneshot(send_json("POST", "/materias", Some(&estudiante.id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn suscripciones_y_clases_por_usuario() {
    let (app, pool, admin) = setup().await;
    let materia = crear_materia(&app, &admin, "MAT101").await;
    crear_materia(&app, &admin, "FIS201").await;

    let estudiante = db::usuarios::insert(
        &pool,
        NuevoUsuario {
            email: "estudiante@universidad.edu".to_string(),
            nombre: "Juan".to_string(),
            apellido: None,
            telefono: None,
            role: Role::Suscriptor,
        },
    )
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/suscripciones",
            Some(&estudiante.id),
            json!({ "user_id": estudiante.id, "materia_id": materia["id"], "alarma_minutos": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Duplicada.
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/suscripciones",
            Some(&estudiante.id),
            json!({ "user_id": estudiante.id, "materia_id": materia["id"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get(&format!("/suscripciones?userId={}", estudiante.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lista = body_json(response).await;
    assert_eq!(lista.as_array().unwrap().len(), 1);
    assert_eq!(lista[0]["materia_codigo"], "MAT101");

    // userId es obligatorio en el listado.
    let response = app.clone().oneshot(get("/suscripciones")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Solo quedan disponibles las materias no suscritas.
    let response = app
        .clone()
        .oneshot(get(&format!("/materias/disponibles?userId={}", estudiante.id)))
        .await
        .unwrap();
    let disponibles = body_json(response).await;
    assert_eq!(disponibles.as_array().unwrap().len(), 1);
    assert_eq!(disponibles[0]["codigo"], "FIS201");

    // Las clases del usuario siguen sus suscripciones.
    app.clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia["id"],
                "fecha": "2024-01-15",
                "hora_inicio": "08:00",
                "hora_fin": "10:00"
            }),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(get(&format!("/clases?userId={}", estudiante.id)))
        .await
        .unwrap();
    let clases = body_json(response).await;
    assert_eq!(clases.as_array().unwrap().len(), 1);
    assert_eq!(clases[0]["materia_codigo"], "MAT101");
}

#[tokio::test]
async fn eliminar_materia_referenciada_devuelve_409() {
    let (app, _pool, admin) = setup().await;
    let materia = crear_materia(&app, &admin, "MAT101").await;
    let materia_id = materia["id"].as_str().unwrap().to_string();

    app.clone()
        .oneshot(send_json(
            "POST",
            "/clases",
            Some(&admin),
            json!({
                "materia_id": materia_id,
                "fecha": "2024-01-15",
                "hora_inicio": "08:00",
                "hora_fin": "10:00"
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/materias/{materia_id}"))
                .header("x-user-id", &admin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_responde_success_true() {
    let (app, _pool, admin) = setup().await;
    let aula = crear_aula(&app, &admin, "B205").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/aulas/{}", aula["id"].as_str().unwrap()))
                .header("x-user-id", &admin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cuerpo = body_json(response).await;
    assert_eq!(cuerpo["success"], true);
}

#[tokio::test]
async fn recurso_inexistente_devuelve_404() {
    let (app, _pool, _admin) = setup().await;
    let response = app
        .clone()
        .oneshot(get("/materias/no-existe"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let cuerpo = body_json(response).await;
    assert!(cuerpo["error"].as_str().is_some());
}

#[tokio::test]
async fn notificaciones_se_crean_y_marcan_enviadas() {
    let (app, pool, admin) = setup().await;

    let estudiante = db::usuarios::insert(
        &pool,
        NuevoUsuario {
            email: "estudiante@universidad.edu".to_string(),
            nombre: "Juan".to_string(),
            apellido: None,
            telefono: None,
            role: Role::Suscriptor,
        },
    )
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/notificaciones",
            Some(&admin),
            json!({
                "user_id": estudiante.id,
                "tipo": "cancelacion",
                "titulo": "Clase cancelada",
                "mensaje": "La clase de MAT101 fue cancelada"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let notificacion = body_json(response).await;
    // El NoopNotifier entrega siempre, la fila queda enviada.
    assert_eq!(notificacion["enviada"], true);
    assert_eq!(notificacion["leida"], false);

    // El listado exige userId.
    let response = app.clone().oneshot(get("/notificaciones")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get(&format!(
            "/notificaciones?userId={}&leida=false",
            estudiante.id
        )))
        .await
        .unwrap();
    let lista = body_json(response).await;
    assert_eq!(lista.as_array().unwrap().len(), 1);

    // Marcar leída como el propio usuario.
    let id = notificacion["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            &format!("/notificaciones/{id}"),
            Some(&estudiante.id),
            json!({ "leida": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let actualizada = body_json(response).await;
    assert_eq!(actualizada["leida"], true);
}
