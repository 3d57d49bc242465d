use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::scheduling;

/// Persisted lifecycle state. The richer display status is derived on read,
/// never stored, so the two can not drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EstadoClase {
    Programada,
    Cancelada,
}

/// Derived display status shown by the scheduling views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoVisible {
    PorAsignar,
    Asignada,
    Cancelada,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Clase {
    pub id: String,
    pub materia_id: String,
    pub aula_id: Option<String>,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub estado: EstadoClase,
    pub motivo_cancelacion: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Clase {
    pub fn estado_visible(&self) -> EstadoVisible {
        scheduling::estado_visible(self.estado, self.aula_id.as_deref())
    }
}

/// Row of the `clases_completas` view: clase joined with materia, aula and
/// docente for list display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClaseCompleta {
    pub id: String,
    pub materia_id: String,
    pub materia_codigo: String,
    pub materia_nombre: String,
    pub aula_id: Option<String>,
    pub aula_codigo: Option<String>,
    pub aula_nombre: Option<String>,
    pub aula_ubicacion: Option<String>,
    pub docente_nombre: Option<String>,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub estado: EstadoClase,
    pub motivo_cancelacion: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ClaseCompleta {
    pub fn estado_visible(&self) -> EstadoVisible {
        scheduling::estado_visible(self.estado, self.aula_id.as_deref())
    }
}

/// `ClaseCompleta` plus its derived status, as the API serializes it.
#[derive(Debug, Clone, Serialize)]
pub struct ClaseConEstado {
    #[serde(flatten)]
    pub clase: ClaseCompleta,
    pub estado_visible: EstadoVisible,
}

impl From<ClaseCompleta> for ClaseConEstado {
    fn from(clase: ClaseCompleta) -> Self {
        let estado_visible = clase.estado_visible();
        Self {
            clase,
            estado_visible,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaClase {
    pub materia_id: String,
    pub aula_id: Option<String>,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarClase {
    pub materia_id: Option<String>,
    #[serde(default, deserialize_with = "super::campo_presente")]
    pub aula_id: Option<Option<String>>,
    pub fecha: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub estado: Option<EstadoClase>,
    #[serde(default, deserialize_with = "super::campo_presente")]
    pub motivo_cancelacion: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelarClase {
    pub motivo: String,
}
