//! Display-status derivation and aula double-booking detection.
//!
//! Both are pure functions over already-validated rows. Hora fields are
//! normalized zero-padded `HH:MM` strings (see `validate::normalizar_hora`),
//! so lexicographic order is time order.

use crate::models::{ClaseCompleta, EstadoClase, EstadoVisible};

/// Derives the status the scheduling views display. Cancellation wins over
/// classroom assignment.
pub fn estado_visible(estado: EstadoClase, aula_id: Option<&str>) -> EstadoVisible {
    if estado == EstadoClase::Cancelada {
        EstadoVisible::Cancelada
    } else if aula_id.is_some() {
        EstadoVisible::Asignada
    } else {
        EstadoVisible::PorAsignar
    }
}

/// Half-open interval overlap: `[inicio_a, fin_a)` intersects `[inicio_b, fin_b)`.
/// Back-to-back bookings (one ends exactly when the other starts) do not overlap.
pub fn solapan(inicio_a: &str, fin_a: &str, inicio_b: &str, fin_b: &str) -> bool {
    inicio_a < fin_b && inicio_b < fin_a
}

/// A candidate aula booking, as checked before a clase insert or update.
/// `clase_id` is the row being updated, if any; a clase never conflicts with
/// itself.
#[derive(Debug, Clone, Copy)]
pub struct Reserva<'a> {
    pub clase_id: Option<&'a str>,
    pub aula_id: &'a str,
    pub fecha: &'a str,
    pub hora_inicio: &'a str,
    pub hora_fin: &'a str,
}

/// Returns the first existing clase that double-books the aula: same aula,
/// same fecha, overlapping horario, and neither side cancelada. The caller
/// reports the conflicting materia codigo to the user.
pub fn buscar_conflicto<'a>(
    reserva: &Reserva<'_>,
    existentes: &'a [ClaseCompleta],
) -> Option<&'a ClaseCompleta> {
    existentes.iter().find(|c| {
        Some(c.id.as_str()) != reserva.clase_id
            && c.estado != EstadoClase::Cancelada
            && c.aula_id.as_deref() == Some(reserva.aula_id)
            && c.fecha == reserva.fecha
            && solapan(
                reserva.hora_inicio,
                reserva.hora_fin,
                &c.hora_inicio,
                &c.hora_fin,
            )
    })
}
