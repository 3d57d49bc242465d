use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Materia {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub creditos: i32,
    pub docente_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// List-view row: materia with the docente name resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MateriaConDocente {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub creditos: i32,
    pub docente_id: Option<String>,
    pub docente_nombre: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaMateria {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(default)]
    pub creditos: i32,
    pub docente_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarMateria {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "super::campo_presente")]
    pub descripcion: Option<Option<String>>,
    pub creditos: Option<i32>,
    #[serde(default, deserialize_with = "super::campo_presente")]
    pub docente_id: Option<Option<String>>,
}
