use sqlx::SqlitePool;

use crate::error::{AppError, es_violacion_unica};
use crate::models::{
    ActualizarSuscripcion, NuevaSuscripcion, Suscripcion, SuscripcionCompleta,
};
use crate::validate;

pub async fn fetch_by_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<SuscripcionCompleta>, AppError> {
    let suscripciones = sqlx::query_as::<_, SuscripcionCompleta>(
        "SELECT * FROM suscripciones_completas WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(suscripciones)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Suscripcion>, AppError> {
    let suscripcion = sqlx::query_as::<_, Suscripcion>("SELECT * FROM suscripciones WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(suscripcion)
}

pub async fn find_completa(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<SuscripcionCompleta>, AppError> {
    let suscripcion = sqlx::query_as::<_, SuscripcionCompleta>(
        "SELECT * FROM suscripciones_completas WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(suscripcion)
}

pub async fn is_subscribed(
    db: &SqlitePool,
    user_id: &str,
    materia_id: &str,
) -> Result<bool, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM suscripciones WHERE user_id = ? AND materia_id = ?",
    )
    .bind(user_id)
    .bind(materia_id)
    .fetch_one(db)
    .await?;
    Ok(count > 0)
}

pub async fn insert(db: &SqlitePool, req: NuevaSuscripcion) -> Result<Suscripcion, AppError> {
    validate::validar_alarma_minutos(req.alarma_minutos)?;

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

    sqlx::query(
        r#"
        INSERT INTO suscripciones (id, user_id, materia_id, alarma_minutos, alarma_activa, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.user_id)
    .bind(&req.materia_id)
    .bind(req.alarma_minutos)
    .bind(req.alarma_activa)
    .bind(&now)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya estás suscrito a esta materia".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(Suscripcion {
        id,
        user_id: req.user_id,
        materia_id: req.materia_id,
        alarma_minutos: req.alarma_minutos,
        alarma_activa: req.alarma_activa,
        created_at: now,
    })
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: ActualizarSuscripcion,
) -> Result<Suscripcion, AppError> {
    let mut current = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;

    if let Some(alarma_minutos) = req.alarma_minutos {
        validate::validar_alarma_minutos(alarma_minutos)?;
        current.alarma_minutos = alarma_minutos;
    }
    if let Some(alarma_activa) = req.alarma_activa {
        current.alarma_activa = alarma_activa;
    }

    sqlx::query("UPDATE suscripciones SET alarma_minutos = ?, alarma_activa = ? WHERE id = ?")
        .bind(current.alarma_minutos)
        .bind(current.alarma_activa)
        .bind(id)
        .execute(db)
        .await?;

    Ok(current)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM suscripciones WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(result > 0)
}
