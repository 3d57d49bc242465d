//! Demo fixture, loaded only when `SEED_DEMO` is set and the store is empty.
//! This replaces the old silent fallback to mock data: the fixture is an
//! explicit configuration choice, never a runtime surprise.

use chrono::{Days, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;
use crate::models::{NuevaAula, NuevaClase, NuevaMateria, NuevaSuscripcion, NuevoUsuario, Role};

pub async fn cargar_demo(db: &SqlitePool) -> Result<(), AppError> {
    let usuarios = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM usuarios")
        .fetch_one(db)
        .await?;
    if usuarios > 0 {
        info!("seed demo omitido: la base ya tiene datos");
        return Ok(());
    }

    let admin = super::usuarios::insert(
        db,
        NuevoUsuario {
            email: "admin@universidad.edu".to_string(),
            nombre: "Administración".to_string(),
            apellido: None,
            telefono: None,
            role: Role::Admin,
        },
    )
    .await?;

    let docente = super::usuarios::insert(
        db,
        NuevoUsuario {
            email: "garcia@universidad.edu".to_string(),
            nombre: "Laura".to_string(),
            apellido: Some("García".to_string()),
            telefono: Some("+54 11 4000-0000".to_string()),
            role: Role::Docente,
        },
    )
    .await?;

    let estudiante = super::usuarios::insert(
        db,
        NuevoUsuario {
            email: "estudiante@universidad.edu".to_string(),
            nombre: "Juan".to_string(),
            apellido: Some("Pérez".to_string()),
            telefono: None,
            role: Role::Suscriptor,
        },
    )
    .await?;

    let materia = super::materias::insert(
        db,
        NuevaMateria {
            codigo: "MAT101".to_string(),
            nombre: "Matemática I".to_string(),
            descripcion: Some("Álgebra y cálculo introductorio".to_string()),
            creditos: 6,
            docente_id: Some(docente.id.clone()),
        },
    )
    .await?;

    super::materias::insert(
        db,
        NuevaMateria {
            codigo: "FIS201".to_string(),
            nombre: "Física II".to_string(),
            descripcion: None,
            creditos: 4,
            docente_id: Some(docente.id),
        },
    )
    .await?;

    let aula = super::aulas::insert(
        db,
        NuevaAula {
            codigo: "A101".to_string(),
            nombre: "Aula Magna".to_string(),
            ubicacion: "Edificio Central, planta baja".to_string(),
            capacidad: 120,
            equipamiento: vec!["proyector".to_string(), "pizarra".to_string()],
            activa: true,
        },
    )
    .await?;

    let manana = (Utc::now().date_naive() + Days::new(1))
        .format("%Y-%m-%d")
        .to_string();

    super::clases::insert(
        db,
        NuevaClase {
            materia_id: materia.id.clone(),
            aula_id: Some(aula.id),
            fecha: manana,
            hora_inicio: "08:00".to_string(),
            hora_fin: "10:00".to_string(),
        },
    )
    .await?;

    super::suscripciones::insert(
        db,
        NuevaSuscripcion {
            user_id: estudiante.id,
            materia_id: materia.id,
            alarma_minutos: 30,
            alarma_activa: true,
        },
    )
    .await?;

    info!("seed demo cargado (admin: {})", admin.email);
    Ok(())
}
