use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{ActualizarNotificacion, Notificacion, NuevaNotificacion};

pub async fn fetch_by_user(
    db: &SqlitePool,
    user_id: &str,
    leida: Option<bool>,
) -> Result<Vec<Notificacion>, AppError> {
    let notificaciones = match leida {
        Some(leida) => {
            sqlx::query_as::<_, Notificacion>(
                "SELECT * FROM notificaciones WHERE user_id = ? AND leida = ? ORDER BY created_at DESC",
            )
            .bind(user_id)
            .bind(leida)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, Notificacion>(
                "SELECT * FROM notificaciones WHERE user_id = ? ORDER BY created_at DESC",
            )
            .bind(user_id)
            .fetch_all(db)
            .await?
        }
    };
    Ok(notificaciones)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Notificacion>, AppError> {
    let notificacion =
        sqlx::query_as::<_, Notificacion>("SELECT * FROM notificaciones WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(notificacion)
}

pub async fn insert(db: &SqlitePool, req: NuevaNotificacion) -> Result<Notificacion, AppError> {
    let id = super::nuevo_id();
    let now = super::ahora();

    sqlx::query(
        r#"
        INSERT INTO notificaciones (id, user_id, clase_id, tipo, titulo, mensaje, leida, enviada, created_at)
        VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.user_id)
    .bind(&req.clase_id)
    .bind(req.tipo)
    .bind(&req.titulo)
    .bind(&req.mensaje)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Notificacion {
        id,
        user_id: req.user_id,
        clase_id: req.clase_id,
        tipo: req.tipo,
        titulo: req.titulo,
        mensaje: req.mensaje,
        leida: false,
        enviada: false,
        created_at: now,
    })
}

pub async fn marcar_enviada(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE notificaciones SET enviada = 1 WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: ActualizarNotificacion,
) -> Result<Notificacion, AppError> {
    let mut current = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;

    if let Some(leida) = req.leida {
        current.leida = leida;
    }

    sqlx::query("UPDATE notificaciones SET leida = ? WHERE id = ?")
        .bind(current.leida)
        .bind(id)
        .execute(db)
        .await?;

    Ok(current)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM notificaciones WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(result > 0)
}
