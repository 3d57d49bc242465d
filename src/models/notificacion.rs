use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TipoNotificacion {
    Recordatorio,
    CambioAula,
    Cancelacion,
    NuevaClase,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notificacion {
    pub id: String,
    pub user_id: String,
    pub clase_id: Option<String>,
    pub tipo: TipoNotificacion,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    pub enviada: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaNotificacion {
    pub user_id: String,
    pub clase_id: Option<String>,
    pub tipo: TipoNotificacion,
    pub titulo: String,
    pub mensaje: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarNotificacion {
    pub leida: Option<bool>,
}
