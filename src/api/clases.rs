use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::Session;
use crate::db::clases;
use crate::error::AppError;
use crate::models::{ActualizarClase, CancelarClase, Clase, ClaseConEstado, NuevaClase};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ClasesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub proximas: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClasesQuery>,
) -> Result<Json<Vec<ClaseConEstado>>, AppError> {
    let clases = if params.proximas.unwrap_or(false) {
        clases::fetch_proximas(&state.db, params.user_id.as_deref()).await?
    } else if let Some(user_id) = params.user_id.as_deref() {
        clases::fetch_by_user(&state.db, user_id).await?
    } else {
        clases::fetch_completas(&state.db).await?
    };
    Ok(Json(clases.into_iter().map(ClaseConEstado::from).collect()))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaseConEstado>, AppError> {
    let clase = clases::find_completa(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(clase.into()))
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevaClase>,
) -> Result<(StatusCode, Json<Clase>), AppError> {
    session.require_admin()?;
    let clase = clases::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(clase)))
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ActualizarClase>,
) -> Result<Json<Clase>, AppError> {
    session.require_admin()?;
    let clase = clases::update(&state.db, &id, req).await?;
    Ok(Json(clase))
}

pub async fn cancelar(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<CancelarClase>,
) -> Result<Json<Clase>, AppError> {
    session.require_admin()?;
    let clase = clases::cancelar(&state.db, &id, &req.motivo).await?;
    Ok(Json(clase))
}

pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    session.require_admin()?;
    if !clases::delete(&state.db, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(super::deleted())
}
