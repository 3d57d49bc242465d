use sqlx::SqlitePool;
use sqlx::types::Json;

use crate::error::{AppError, es_violacion_unica};
use crate::models::{ActualizarAula, Aula, NuevaAula};
use crate::validate;

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Aula>, AppError> {
    let aulas = sqlx::query_as::<_, Aula>("SELECT * FROM aulas ORDER BY codigo")
        .fetch_all(db)
        .await?;
    Ok(aulas)
}

/// Aulas that can currently host a clase (activa flag on).
pub async fn fetch_disponibles(db: &SqlitePool) -> Result<Vec<Aula>, AppError> {
    let aulas = sqlx::query_as::<_, Aula>("SELECT * FROM aulas WHERE activa = 1 ORDER BY codigo")
        .fetch_all(db)
        .await?;
    Ok(aulas)
}

pub async fn search(db: &SqlitePool, term: &str) -> Result<Vec<Aula>, AppError> {
    let patron = format!("%{term}%");
    let aulas = sqlx::query_as::<_, Aula>(
        "SELECT * FROM aulas WHERE codigo LIKE ?1 OR nombre LIKE ?1 OR ubicacion LIKE ?1 ORDER BY codigo",
    )
    .bind(patron)
    .fetch_all(db)
    .await?;
    Ok(aulas)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Aula>, AppError> {
    let aula = sqlx::query_as::<_, Aula>("SELECT * FROM aulas WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(aula)
}

pub async fn insert(db: &SqlitePool, req: NuevaAula) -> Result<Aula, AppError> {
    validate::validar_codigo_aula(&req.codigo)?;
    validate::validar_nombre(&req.nombre)?;
    validate::validar_ubicacion(&req.ubicacion)?;
    validate::validar_capacidad(req.capacidad)?;

    let id = super::nuevo_id();
    let now = super::ahora();
    let equipamiento = Json(req.equipamiento);

    sqlx::query(
        r#"
        INSERT INTO aulas (id, codigo, nombre, ubicacion, capacidad, equipamiento, activa, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.codigo)
    .bind(&req.nombre)
    .bind(&req.ubicacion)
    .bind(req.capacidad)
    .bind(&equipamiento)
    .bind(req.activa)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya existe un aula con ese código".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(Aula {
        id,
        codigo: req.codigo,
        nombre: req.nombre,
        ubicacion: req.ubicacion,
        capacidad: req.capacidad,
        equipamiento,
        activa: req.activa,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update(db: &SqlitePool, id: &str, req: ActualizarAula) -> Result<Aula, AppError> {
    let mut current = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;

    if let Some(codigo) = req.codigo {
        validate::validar_codigo_aula(&codigo)?;
        current.codigo = codigo;
    }
    if let Some(nombre) = req.nombre {
        validate::validar_nombre(&nombre)?;
        current.nombre = nombre;
    }
    if let Some(ubicacion) = req.ubicacion {
        validate::validar_ubicacion(&ubicacion)?;
        current.ubicacion = ubicacion;
    }
    if let Some(capacidad) = req.capacidad {
        validate::validar_capacidad(capacidad)?;
        current.capacidad = capacidad;
    }
    if let Some(equipamiento) = req.equipamiento {
        current.equipamiento = Json(equipamiento);
    }
    if let Some(activa) = req.activa {
        current.activa = activa;
    }
    current.updated_at = super::ahora();

    sqlx::query(
        r#"
        UPDATE aulas
        SET codigo = ?, nombre = ?, ubicacion = ?, capacidad = ?, equipamiento = ?, activa = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&current.codigo)
    .bind(&current.nombre)
    .bind(&current.ubicacion)
    .bind(current.capacidad)
    .bind(&current.equipamiento)
    .bind(current.activa)
    .bind(&current.updated_at)
    .bind(id)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya existe un aula con ese código".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(current)
}

/// Deletes an aula, rejected while clases still reference it.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let referencias =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clases WHERE aula_id = ?")
            .bind(id)
            .fetch_one(db)
            .await?;

    if referencias > 0 {
        return Err(AppError::Conflict(
            "No se puede eliminar: el aula tiene clases asignadas".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM aulas WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
