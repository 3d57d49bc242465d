use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::auth::Session;
use crate::db::notificaciones;
use crate::error::AppError;
use crate::models::{ActualizarNotificacion, Notificacion, NuevaNotificacion};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotificacionesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub leida: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NotificacionesQuery>,
) -> Result<Json<Vec<Notificacion>>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::Validation("userId es requerido".to_string()))?;
    let notificaciones = notificaciones::fetch_by_user(&state.db, &user_id, params.leida).await?;
    Ok(Json(notificaciones))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notificacion>, AppError> {
    let notificacion = notificaciones::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(notificacion))
}

/// Creates the notificación and hands it to the delivery boundary. A delivery
/// failure leaves the row stored with `enviada = false` for a later retry by
/// the external process.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevaNotificacion>,
) -> Result<(StatusCode, Json<Notificacion>), AppError> {
    session.require_admin()?;
    let mut notificacion = notificaciones::insert(&state.db, req).await?;

    match state.notifier.deliver(&notificacion).await {
        Ok(()) => {
            notificaciones::marcar_enviada(&state.db, &notificacion.id).await?;
            notificacion.enviada = true;
        }
        Err(e) => {
            warn!("entrega de notificación fallida: {}", e);
        }
    }

    Ok((StatusCode::CREATED, Json(notificacion)))
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ActualizarNotificacion>,
) -> Result<Json<Notificacion>, AppError> {
    let actual = notificaciones::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    session.require_self_or_admin(&actual.user_id)?;
    let notificacion = notificaciones::update(&state.db, &id, req).await?;
    Ok(Json(notificacion))
}

pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let actual = notificaciones::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    session.require_self_or_admin(&actual.user_id)?;
    notificaciones::delete(&state.db, &id).await?;
    Ok(super::deleted())
}
