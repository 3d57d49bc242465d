use sqlx::SqlitePool;

use crate::error::{AppError, es_violacion_unica};
use crate::models::{ActualizarMateria, Materia, MateriaConDocente, NuevaMateria};
use crate::validate;

const SELECT_CON_DOCENTE: &str = r#"
    SELECT
        m.id, m.codigo, m.nombre, m.descripcion, m.creditos, m.docente_id,
        d.nombre AS docente_nombre,
        m.created_at, m.updated_at
    FROM materias m
    LEFT JOIN usuarios d ON d.id = m.docente_id
"#;

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<MateriaConDocente>, AppError> {
    let materias = sqlx::query_as::<_, MateriaConDocente>(&format!(
        "{SELECT_CON_DOCENTE} ORDER BY m.nombre"
    ))
    .fetch_all(db)
    .await?;
    Ok(materias)
}

pub async fn search(db: &SqlitePool, term: &str) -> Result<Vec<MateriaConDocente>, AppError> {
    let patron = format!("%{term}%");
    let materias = sqlx::query_as::<_, MateriaConDocente>(&format!(
        "{SELECT_CON_DOCENTE} WHERE m.codigo LIKE ?1 OR m.nombre LIKE ?1 ORDER BY m.nombre"
    ))
    .bind(patron)
    .fetch_all(db)
    .await?;
    Ok(materias)
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<MateriaConDocente>, AppError> {
    let materia = sqlx::query_as::<_, MateriaConDocente>(&format!(
        "{SELECT_CON_DOCENTE} WHERE m.id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(materia)
}

/// Materias the user is not yet subscribed to.
pub async fn fetch_disponibles(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<MateriaConDocente>, AppError> {
    let materias = sqlx::query_as::<_, MateriaConDocente>(&format!(
        "{SELECT_CON_DOCENTE}
         WHERE m.id NOT IN (SELECT materia_id FROM suscripciones WHERE user_id = ?)
         ORDER BY m.nombre"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(materias)
}

pub async fn insert(db: &SqlitePool, req: NuevaMateria) -> Result<Materia, AppError> {
    validate::validar_codigo_materia(&req.codigo)?;
    validate::validar_nombre(&req.nombre)?;

    let id = super::nuevo_id();
    let now = super::ahora();

    sqlx::query(
        r#"
        INSERT INTO materias (id, codigo, nombre, descripcion, creditos, docente_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.codigo)
    .bind(&req.nombre)
    .bind(&req.descripcion)
    .bind(req.creditos)
    .bind(&req.docente_id)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya existe una materia con ese código".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(Materia {
        id,
        codigo: req.codigo,
        nombre: req.nombre,
        descripcion: req.descripcion,
        creditos: req.creditos,
        docente_id: req.docente_id,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: ActualizarMateria,
) -> Result<Materia, AppError> {
    let mut current = sqlx::query_as::<_, Materia>("SELECT * FROM materias WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(codigo) = req.codigo {
        validate::validar_codigo_materia(&codigo)?;
        current.codigo = codigo;
    }
    if let Some(nombre) = req.nombre {
        validate::validar_nombre(&nombre)?;
        current.nombre = nombre;
    }
    if let Some(descripcion) = req.descripcion {
        current.descripcion = descripcion;
    }
    if let Some(creditos) = req.creditos {
        current.creditos = creditos;
    }
    if let Some(docente_id) = req.docente_id {
        current.docente_id = docente_id;
    }
    current.updated_at = super::ahora();

    sqlx::query(
        r#"
        UPDATE materias
        SET codigo = ?, nombre = ?, descripcion = ?, creditos = ?, docente_id = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&current.codigo)
    .bind(&current.nombre)
    .bind(&current.descripcion)
    .bind(current.creditos)
    .bind(&current.docente_id)
    .bind(&current.updated_at)
    .bind(id)
    .execute(db)
    .await
    .map_err(|e| {
        if es_violacion_unica(&e) {
            AppError::Validation("Ya existe una materia con ese código".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(current)
}

/// Deletes a materia. Rejected while clases still reference it; its
/// suscripciones go with it.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let referencias = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM clases WHERE materia_id = ?",
    )
    .bind(id)
    .fetch_one(db)
    .await?;

    if referencias > 0 {
        return Err(AppError::Conflict(
            "No se puede eliminar: la materia tiene clases programadas".to_string(),
        ));
    }

    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM suscripciones WHERE materia_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM materias WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    Ok(result > 0)
}
