use chrono::{Days, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::{AppError, es_violacion_unica};
use crate::models::{
    ActualizarClase, Clase, ClaseCompleta, EstadoClase, NuevaClase,
};
use crate::scheduling::{self, Reserva};
use crate::validate;

pub async fn fetch_completas(db: &SqlitePool) -> Result<Vec<ClaseCompleta>, AppError> {
    let clases = sqlx::query_as::<_, ClaseCompleta>(
        "SELECT * FROM clases_completas ORDER BY fecha, hora_inicio",
    )
    .fetch_all(db)
    .await?;
    Ok(clases)
}

/// Clases of the materias the user is subscribed to.
pub async fn fetch_by_user(db: &SqlitePool, user_id: &str) -> Result<Vec<ClaseCompleta>, AppError> {
    let clases = sqlx::query_as::<_, ClaseCompleta>(
        r#"
        SELECT * FROM clases_completas
        WHERE materia_id IN (SELECT materia_id FROM suscripciones WHERE user_id = ?)
        ORDER BY fecha, hora_inicio
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(clases)
}

/// Clases in the next seven days, optionally narrowed to the user's
/// suscripciones.
pub async fn fetch_proximas(
    db: &SqlitePool,
    user_id: Option<&str>,
) -> Result<Vec<ClaseCompleta>, AppError> {
    let hoy = Utc::now().date_naive();
    let limite = hoy + Days::new(7);
    let desde = hoy.format("%Y-%m-%d").to_string();
    let hasta = limite.format("%Y-%m-%d").to_string();

    let clases = match user_id {
        Some(user_id) => {
            sqlx::query_as::<_, ClaseCompleta>(
                r#"
                SELECT * FROM clases_completas
                WHERE fecha >= ? AND fecha <= ?
                  AND materia_id IN (SELECT materia_id FROM suscripciones WHERE user_id = ?)
                ORDER BY fecha, hora_inicio
                "#,
            )
            .bind(&desde)
            .bind(&hasta)
            .bind(user_id)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, ClaseCompleta>(
                r#"
                SELECT * FROM clases_completas
                WHERE fecha >= ? AND fecha <= ?
                ORDER BY fecha, hora_inicio
                "#,
            )
            .bind(&desde)
            .bind(&hasta)
            .fetch_all(db)
            .await?
        }
    };
    Ok(clases)
}

pub async fn find_completa(db: &SqlitePool, id: &str) -> Result<Option<ClaseCompleta>, AppError> {
    let clase = sqlx::query_as::<_, ClaseCompleta>("SELECT * FROM clases_completas WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(clase)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Clase>, AppError> {
    let clase = sqlx::query_as::<_, Clase>("SELECT * FROM clases WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(clase)
}

pub async fn insert(db: &SqlitePool, req: NuevaClase) -> Result<Clase, AppError> {
    let fecha = validate::normalizar_fecha(&req.fecha)?;
    let (hora_inicio, hora_fin) = validate::validar_horario(&req.hora_inicio, &req.hora_fin)?;

    let materia_existe =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materias WHERE id = ?")
            .bind(&req.materia_id)
            .fetch_one(db)
            .await?;
    if materia_existe == 0 {
        return Err(AppError::Validation("Materia inválida".to_string()));
    }

    let id = super::nuevo_id();
    let now = super::ahora();

    // Check-and-set: the availability read and the insert share one
    // transaction, and the partial unique index backstops concurrent admins.
    let mut tx = db.begin().await?;

    if let Some(aula_id) = &req.aula_id {
        let aula_codigo = codigo_de_aula(&mut tx, aula_id).await?;
        confirmar_disponibilidad(
            &mut tx,
            Reserva {
                clase_id: None,
                aula_id,
                fecha: &fecha,
                hora_inicio: &hora_inicio,
                hora_fin: &hora_fin,
            },
            &aula_codigo,
        )
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO clases
            (id, materia_id, aula_id, fecha, hora_inicio, hora_fin, estado, motivo_cancelacion, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 'programada', NULL, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.materia_id)
    .bind(&req.aula_id)
    .bind(&fecha)
    .bind(&hora_inicio)
    .bind(&hora_fin)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(ocupada_si_unica)?;

    tx.commit().await?;

    Ok(Clase {
        id,
        materia_id: req.materia_id,
        aula_id: req.aula_id,
        fecha,
        hora_inicio,
        hora_fin,
        estado: EstadoClase::Programada,
        motivo_cancelacion: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update(db: &SqlitePool, id: &str, req: ActualizarClase) -> Result<Clase, AppError> {
    let mut current = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;

    if let Some(materia_id) = req.materia_id {
        let existe = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materias WHERE id = ?")
            .bind(&materia_id)
            .fetch_one(db)
            .await?;
        if existe == 0 {
            return Err(AppError::Validation("Materia inválida".to_string()));
        }
        current.materia_id = materia_id;
    }
    if let Some(aula_id) = req.aula_id {
        current.aula_id = aula_id;
    }
    if let Some(fecha) = req.fecha {
        current.fecha = validate::normalizar_fecha(&fecha)?;
    }
    if let Some(hora_inicio) = req.hora_inicio {
        current.hora_inicio = validate::normalizar_hora(&hora_inicio)?;
    }
    if let Some(hora_fin) = req.hora_fin {
        current.hora_fin = validate::normalizar_hora(&hora_fin)?;
    }
    let (hora_inicio, hora_fin) = validate::validar_horario(&current.hora_inicio, &current.hora_fin)?;
    current.hora_inicio = hora_inicio;
    current.hora_fin = hora_fin;
    if let Some(estado) = req.estado {
        current.estado = estado;
    }
    if let Some(motivo) = req.motivo_cancelacion {
        current.motivo_cancelacion = motivo;
    }
    current.updated_at = super::ahora();

    let mut tx = db.begin().await?;

    if current.estado != EstadoClase::Cancelada {
        if let Some(aula_id) = &current.aula_id {
            let aula_codigo = codigo_de_aula(&mut tx, aula_id).await?;
            confirmar_disponibilidad(
                &mut tx,
                Reserva {
                    clase_id: Some(&current.id),
                    aula_id,
                    fecha: &current.fecha,
                    hora_inicio: &current.hora_inicio,
                    hora_fin: &current.hora_fin,
                },
                &aula_codigo,
            )
            .await?;
        }
    }

    sqlx::query(
        r#"
        UPDATE clases
        SET materia_id = ?, aula_id = ?, fecha = ?, hora_inicio = ?, hora_fin = ?,
            estado = ?, motivo_cancelacion = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&current.materia_id)
    .bind(&current.aula_id)
    .bind(&current.fecha)
    .bind(&current.hora_inicio)
    .bind(&current.hora_fin)
    .bind(current.estado)
    .bind(&current.motivo_cancelacion)
    .bind(&current.updated_at)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(ocupada_si_unica)?;

    tx.commit().await?;

    Ok(current)
}

/// Cancels a clase, keeping its aula assignment. The display status still
/// reports cancelada.
pub async fn cancelar(db: &SqlitePool, id: &str, motivo: &str) -> Result<Clase, AppError> {
    if motivo.trim().is_empty() {
        return Err(AppError::Validation("El motivo es requerido".to_string()));
    }

    let now = super::ahora();
    let afectadas = sqlx::query(
        "UPDATE clases SET estado = 'cancelada', motivo_cancelacion = ?, updated_at = ? WHERE id = ?",
    )
    .bind(motivo)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if afectadas == 0 {
        return Err(AppError::NotFound);
    }

    find_by_id(db, id).await?.ok_or(AppError::NotFound)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM clases WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(result > 0)
}

async fn codigo_de_aula(
    tx: &mut Transaction<'_, Sqlite>,
    aula_id: &str,
) -> Result<String, AppError> {
    sqlx::query_scalar::<_, String>("SELECT codigo FROM aulas WHERE id = ?")
        .bind(aula_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::Validation("Aula inválida".to_string()))
}

/// The authoritative double-booking check, run inside the write transaction.
async fn confirmar_disponibilidad(
    tx: &mut Transaction<'_, Sqlite>,
    reserva: Reserva<'_>,
    aula_codigo: &str,
) -> Result<(), AppError> {
    let existentes = sqlx::query_as::<_, ClaseCompleta>(
        "SELECT * FROM clases_completas WHERE aula_id = ? AND fecha = ? AND estado != 'cancelada'",
    )
    .bind(reserva.aula_id)
    .bind(reserva.fecha)
    .fetch_all(&mut **tx)
    .await?;

    if let Some(conflicto) = scheduling::buscar_conflicto(&reserva, &existentes) {
        return Err(AppError::Conflict(format!(
            "El aula {} ya está ocupada en ese horario por {}",
            aula_codigo, conflicto.materia_codigo
        )));
    }
    Ok(())
}

fn ocupada_si_unica(e: sqlx::Error) -> AppError {
    if es_violacion_unica(&e) {
        AppError::Conflict("El aula ya está ocupada en ese horario".to_string())
    } else {
        e.into()
    }
}
