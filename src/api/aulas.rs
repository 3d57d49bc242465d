use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::Session;
use crate::db::aulas;
use crate::error::AppError;
use crate::models::{ActualizarAula, Aula, NuevaAula};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AulasQuery {
    pub search: Option<String>,
    pub disponibles: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AulasQuery>,
) -> Result<Json<Vec<Aula>>, AppError> {
    let aulas = if params.disponibles.unwrap_or(false) {
        aulas::fetch_disponibles(&state.db).await?
    } else {
        match params.search.as_deref() {
            Some(term) if !term.is_empty() => aulas::search(&state.db, term).await?,
            _ => aulas::fetch_all(&state.db).await?,
        }
    };
    Ok(Json(aulas))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Aula>, AppError> {
    let aula = aulas::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(aula))
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevaAula>,
) -> Result<(StatusCode, Json<Aula>), AppError> {
    session.require_admin()?;
    let aula = aulas::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(aula)))
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ActualizarAula>,
) -> Result<Json<Aula>, AppError> {
    session.require_admin()?;
    let aula = aulas::update(&state.db, &id, req).await?;
    Ok(Json(aula))
}

pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    session.require_admin()?;
    if !aulas::delete(&state.db, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(super::deleted())
}
