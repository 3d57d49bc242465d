pub mod aula;
pub mod clase;
pub mod materia;
pub mod notificacion;
pub mod suscripcion;
pub mod usuario;

pub use aula::{ActualizarAula, Aula, NuevaAula};
pub use clase::{
    ActualizarClase, CancelarClase, Clase, ClaseCompleta, ClaseConEstado, EstadoClase,
    EstadoVisible, NuevaClase,
};
pub use materia::{ActualizarMateria, Materia, MateriaConDocente, NuevaMateria};
pub use notificacion::{ActualizarNotificacion, Notificacion, NuevaNotificacion, TipoNotificacion};
pub use suscripcion::{
    ActualizarSuscripcion, NuevaSuscripcion, Suscripcion, SuscripcionCompleta,
};
pub use usuario::{NuevoUsuario, Role, Usuario};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent JSON field (`None`) from an explicit `null`
/// (`Some(None)`), so updates can clear nullable columns like `aula_id`.
pub fn campo_presente<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
