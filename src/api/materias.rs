use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::Session;
use crate::db::materias;
use crate::error::AppError;
use crate::models::{ActualizarMateria, Materia, MateriaConDocente, NuevaMateria};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MateriasQuery {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct DisponiblesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MateriasQuery>,
) -> Result<Json<Vec<MateriaConDocente>>, AppError> {
    let materias = match params.search.as_deref() {
        Some(term) if !term.is_empty() => materias::search(&state.db, term).await?,
        _ => materias::fetch_all(&state.db).await?,
    };
    Ok(Json(materias))
}

/// Materias the user can still subscribe to.
pub async fn disponibles(
    State(state): State<AppState>,
    Query(params): Query<DisponiblesQuery>,
) -> Result<Json<Vec<MateriaConDocente>>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::Validation("userId es requerido".to_string()))?;
    let materias = materias::fetch_disponibles(&state.db, &user_id).await?;
    Ok(Json(materias))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MateriaConDocente>, AppError> {
    let materia = materias::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(materia))
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevaMateria>,
) -> Result<(StatusCode, Json<Materia>), AppError> {
    session.require_admin()?;
    let materia = materias::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(materia)))
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ActualizarMateria>,
) -> Result<Json<Materia>, AppError> {
    session.require_admin()?;
    let materia = materias::update(&state.db, &id, req).await?;
    Ok(Json(materia))
}

pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    session.require_admin()?;
    if !materias::delete(&state.db, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(super::deleted())
}
