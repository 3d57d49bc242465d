pub mod aulas;
pub mod clases;
pub mod materias;
pub mod notificaciones;
pub mod suscripciones;
pub mod usuarios;

use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/materias", get(materias::list).post(materias::create))
        .route("/materias/disponibles", get(materias::disponibles))
        .route(
            "/materias/{id}",
            get(materias::get_one)
                .put(materias::update)
                .delete(materias::remove),
        )
        .route("/aulas", get(aulas::list).post(aulas::create))
        .route(
            "/aulas/{id}",
            get(aulas::get_one).put(aulas::update).delete(aulas::remove),
        )
        .route("/clases", get(clases::list).post(clases::create))
        .route(
            "/clases/{id}",
            get(clases::get_one)
                .put(clases::update)
                .delete(clases::remove),
        )
        .route("/clases/{id}/cancelar", post(clases::cancelar))
        .route(
            "/suscripciones",
            get(suscripciones::list).post(suscripciones::create),
        )
        .route(
            "/suscripciones/{id}",
            get(suscripciones::get_one)
                .put(suscripciones::update)
                .delete(suscripciones::remove),
        )
        .route("/usuarios", get(usuarios::list).post(usuarios::create))
        .route("/usuarios/{id}", get(usuarios::get_one))
        .route(
            "/notificaciones",
            get(notificaciones::list).post(notificaciones::create),
        )
        .route(
            "/notificaciones/{id}",
            get(notificaciones::get_one)
                .put(notificaciones::update)
                .delete(notificaciones::remove),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Body of every successful DELETE.
pub(crate) fn deleted() -> Json<Value> {
    Json(json!({ "success": true }))
}
