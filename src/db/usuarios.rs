use sqlx::SqlitePool;

use crate::error::{AppError, es_violacion_unica};
use crate::models::{NuevoUsuario, Role, Usuario};
use crate::validate;

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Usuario>, AppError> {
    let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY nombre")
        .fetch_all(db)
        .await?;
    Ok(usuarios)
}

pub async fn fetch_by_role(db: &SqlitePool, role: Role) -> Result<Vec<Usuario>, AppError> {
    let usuarios = sqlx::query_as::<_, Usuario>(
        "SELECT * FROM usuarios WHERE role = ? ORDER BY nombre",
    )
    .bind(role)
    .fetch_all(db)
    .await?;
    Ok(usuarios)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Usuario>, AppError> {
    let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(usuario)
}

pub async fn insert(db: &SqlitePool, req: NuevoUsuario) -> Result<Usuario, AppError> {
    validate::validar_email(&req.email)?;
    validate::validar_nombre(&req.nombre)?;

    let id = super::nuevo_id();
    let now = super::ahora();

    sqlx::query(
        r#"
        INSERT INTO usuarios (id, email, nombre, apellido, telefono, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.email)
    .bind(&req.nombre)
    .bind(&req.apellido)
    .bind(&req.telefono)
    .bind(req.role)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya existe un usuario con ese email".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(Usuario {
        id,
        email: req.email,
        nombre: req.nombre,
        apellido: req.apellido,
        telefono: req.telefono,
        role: req.role,
        created_at: now.clone(),
        updated_at: now,
    })
}
