use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::Session;
use crate::db::suscripciones;
use crate::error::AppError;
use crate::models::{
    ActualizarSuscripcion, NuevaSuscripcion, Suscripcion, SuscripcionCompleta,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SuscripcionesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SuscripcionesQuery>,
) -> Result<Json<Vec<SuscripcionCompleta>>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::Validation("userId es requerido".to_string()))?;
    let suscripciones = suscripciones::fetch_by_user(&state.db, &user_id).await?;
    Ok(Json(suscripciones))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuscripcionCompleta>, AppError> {
    let suscripcion = suscripciones::find_completa(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(suscripcion))
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevaSuscripcion>,
) -> Result<(StatusCode, Json<Suscripcion>), AppError> {
    session.require_self_or_admin(&req.user_id)?;
    let suscripcion = suscripciones::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(suscripcion)))
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ActualizarSuscripcion>,
) -> Result<Json<Suscripcion>, AppError> {
    let actual = suscripciones::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    session.require_self_or_admin(&actual.user_id)?;
    let suscripcion = suscripciones::update(&state.db, &id, req).await?;
    Ok(Json(suscripcion))
}

pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let actual = suscripciones::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    session.require_self_or_admin(&actual.user_id)?;
    suscripciones::delete(&state.db, &id).await?;
    Ok(super::deleted())
}
