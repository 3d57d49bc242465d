use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Aula {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub ubicacion: String,
    pub capacidad: i32,
    pub equipamiento: Json<Vec<String>>,
    pub activa: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaAula {
    pub codigo: String,
    pub nombre: String,
    pub ubicacion: String,
    pub capacidad: i32,
    #[serde(default)]
    pub equipamiento: Vec<String>,
    #[serde(default = "activa_default")]
    pub activa: bool,
}

fn activa_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarAula {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub ubicacion: Option<String>,
    pub capacidad: Option<i32>,
    pub equipamiento: Option<Vec<String>>,
    pub activa: Option<bool>,
}
