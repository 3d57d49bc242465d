use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Suscripcion {
    pub id: String,
    pub user_id: String,
    pub materia_id: String,
    pub alarma_minutos: i32,
    pub alarma_activa: bool,
    pub created_at: String,
}

/// Row of the `suscripciones_completas` view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SuscripcionCompleta {
    pub id: String,
    pub user_id: String,
    pub materia_id: String,
    pub materia_codigo: String,
    pub materia_nombre: String,
    pub docente_nombre: Option<String>,
    pub alarma_minutos: i32,
    pub alarma_activa: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaSuscripcion {
    pub user_id: String,
    pub materia_id: String,
    #[serde(default = "alarma_default")]
    pub alarma_minutos: i32,
    #[serde(default = "alarma_activa_default")]
    pub alarma_activa: bool,
}

fn alarma_default() -> i32 {
    30
}

fn alarma_activa_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarSuscripcion {
    pub alarma_minutos: Option<i32>,
    pub alarma_activa: Option<bool>,
}
