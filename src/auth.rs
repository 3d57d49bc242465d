//! Explicit session context for request handlers. The caller identifies
//! itself with an `x-user-id` header and the session carries the resolved
//! role; there is no global current-user state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::db::usuarios;
use crate::error::AppError;
use crate::models::Role;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Admins act on any record; everyone else only on their own.
    pub fn require_self_or_admin(&self, owner_id: &str) -> Result<(), AppError> {
        if self.role == Role::Admin || self.user_id == owner_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let usuario = usuarios::find_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Session {
            user_id: usuario.id,
            role: usuario.role,
        })
    }
}
