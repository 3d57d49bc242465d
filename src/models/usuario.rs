use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Suscriptor,
    Docente,
}

impl Default for Role {
    fn default() -> Self {
        Role::Suscriptor
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: String,
    pub email: String,
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoUsuario {
    pub email: String,
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    #[serde(default)]
    pub role: Role,
}
