//! Input validation for write requests. Messages are the Spanish strings the
//! UI shows the user.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::AppError;

static MATERIA_CODIGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}[0-9]{3}$").unwrap());
static AULA_CODIGO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{3}$").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

fn invalido(mensaje: &str) -> AppError {
    AppError::Validation(mensaje.to_string())
}

pub fn validar_codigo_materia(codigo: &str) -> Result<(), AppError> {
    if codigo.is_empty() {
        return Err(invalido("El código es requerido"));
    }
    if !MATERIA_CODIGO.is_match(codigo) {
        return Err(invalido("Código de materia inválido (ej: MAT101)"));
    }
    Ok(())
}

pub fn validar_codigo_aula(codigo: &str) -> Result<(), AppError> {
    if codigo.is_empty() {
        return Err(invalido("El código es requerido"));
    }
    if !AULA_CODIGO.is_match(codigo) {
        return Err(invalido("Código de aula inválido (ej: A101)"));
    }
    Ok(())
}

pub fn validar_nombre(nombre: &str) -> Result<(), AppError> {
    if nombre.is_empty() {
        return Err(invalido("El nombre es requerido"));
    }
    if nombre.chars().count() > 100 {
        return Err(invalido("Máximo 100 caracteres"));
    }
    Ok(())
}

pub fn validar_ubicacion(ubicacion: &str) -> Result<(), AppError> {
    if ubicacion.is_empty() {
        return Err(invalido("La ubicación es requerida"));
    }
    if ubicacion.chars().count() > 200 {
        return Err(invalido("Máximo 200 caracteres"));
    }
    Ok(())
}

pub fn validar_capacidad(capacidad: i32) -> Result<(), AppError> {
    if capacidad < 1 {
        return Err(invalido("La capacidad debe ser mayor a 0"));
    }
    if capacidad > 1000 {
        return Err(invalido("Máximo 1000 estudiantes"));
    }
    Ok(())
}

pub fn validar_alarma_minutos(minutos: i32) -> Result<(), AppError> {
    if minutos < 5 {
        return Err(invalido("Mínimo 5 minutos"));
    }
    if minutos > 1440 {
        return Err(invalido("Máximo 24 horas"));
    }
    Ok(())
}

pub fn validar_email(email: &str) -> Result<(), AppError> {
    if !EMAIL.is_match(email) {
        return Err(invalido("Email inválido"));
    }
    Ok(())
}

/// Parses and re-renders a fecha so stored values are always `YYYY-MM-DD`.
pub fn normalizar_fecha(fecha: &str) -> Result<String, AppError> {
    let parsed = NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .map_err(|_| invalido("Fecha inválida (AAAA-MM-DD)"))?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Parses and re-renders an hora so stored values are always zero-padded
/// `HH:MM`. The conflict checker relies on that normalization to compare
/// horas as strings.
pub fn normalizar_hora(hora: &str) -> Result<String, AppError> {
    let parsed = NaiveTime::parse_from_str(hora, "%H:%M")
        .map_err(|_| invalido("Hora inválida (HH:MM)"))?;
    Ok(parsed.format("%H:%M").to_string())
}

/// Normalized hora pair with inicio strictly before fin.
pub fn validar_horario(
    hora_inicio: &str,
    hora_fin: &str,
) -> Result<(String, String), AppError> {
    let inicio = normalizar_hora(hora_inicio)?;
    let fin = normalizar_hora(hora_fin)?;
    if inicio >= fin {
        return Err(invalido(
            "La hora de inicio debe ser anterior a la hora de fin",
        ));
    }
    Ok((inicio, fin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_de_materia() {
        assert!(validar_codigo_materia("MAT101").is_ok());
        assert!(validar_codigo_materia("FIS202").is_ok());
        assert!(validar_codigo_materia("ALGO301").is_ok());
        assert!(validar_codigo_materia("M1").is_err());
        assert!(validar_codigo_materia("mat101").is_err());
        assert!(validar_codigo_materia("").is_err());
    }

    #[test]
    fn codigos_de_aula() {
        assert!(validar_codigo_aula("A101").is_ok());
        assert!(validar_codigo_aula("B205").is_ok());
        assert!(validar_codigo_aula("101A").is_err());
        assert!(validar_codigo_aula("AA101").is_err());
        assert!(validar_codigo_aula("A10").is_err());
    }

    #[test]
    fn capacidad_acotada() {
        assert!(validar_capacidad(1).is_ok());
        assert!(validar_capacidad(120).is_ok());
        assert!(validar_capacidad(1000).is_ok());
        assert!(validar_capacidad(0).is_err());
        assert!(validar_capacidad(1001).is_err());
    }

    #[test]
    fn alarma_acotada() {
        assert!(validar_alarma_minutos(5).is_ok());
        assert!(validar_alarma_minutos(1440).is_ok());
        assert!(validar_alarma_minutos(4).is_err());
        assert!(validar_alarma_minutos(1441).is_err());
    }

    #[test]
    fn horas_se_normalizan() {
        assert_eq!(normalizar_hora("8:00").unwrap(), "08:00");
        assert_eq!(normalizar_hora("14:30").unwrap(), "14:30");
        assert!(normalizar_hora("25:00").is_err());
        assert!(normalizar_hora("ocho").is_err());
    }

    #[test]
    fn horario_invertido_se_rechaza() {
        assert!(validar_horario("08:00", "10:00").is_ok());
        assert!(validar_horario("10:00", "08:00").is_err());
        assert!(validar_horario("10:00", "10:00").is_err());
    }

    #[test]
    fn emails() {
        assert!(validar_email("ana@uni.edu").is_ok());
        assert!(validar_email("sin-arroba").is_err());
    }
}
