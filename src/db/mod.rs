pub mod aulas;
pub mod clases;
pub mod materias;
pub mod notificaciones;
pub mod seed;
pub mod suscripciones;
pub mod usuarios;

use chrono::Utc;

/// Timestamp for `created_at` / `updated_at` columns.
pub(crate) fn ahora() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn nuevo_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
