use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::Session;
use crate::db::usuarios;
use crate::error::AppError;
use crate::models::{NuevoUsuario, Role, Usuario};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UsuariosQuery {
    pub role: Option<Role>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UsuariosQuery>,
) -> Result<Json<Vec<Usuario>>, AppError> {
    let usuarios = match params.role {
        Some(role) => usuarios::fetch_by_role(&state.db, role).await?,
        None => usuarios::fetch_all(&state.db).await?,
    };
    Ok(Json(usuarios))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Usuario>, AppError> {
    let usuario = usuarios::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(usuario))
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NuevoUsuario>,
) -> Result<(StatusCode, Json<Usuario>), AppError> {
    session.require_admin()?;
    let usuario = usuarios::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}
