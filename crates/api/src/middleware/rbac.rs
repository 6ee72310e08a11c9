//! Authorization extractors layered on [`AuthUser`].
//!
//! A handler that takes one of these never runs for a caller the access
//! policy rejects.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use merch_core::access::authorize_note_creation;
use merch_core::error::CoreError;
use merch_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Caller must carry the staff override (403 otherwise). Guards the
/// maintenance endpoints under `/api/admin`.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_staff {
            return Ok(RequireStaff(user));
        }
        tracing::debug!(user_id = user.user_id, "Rejected non-staff caller");
        Err(CoreError::Forbidden("Staff access required".into()).into())
    }
}

/// Caller must be allowed to author notes.
///
/// `author_id` is the id the note is recorded under. It always comes from
/// the token, never from the request body.
pub struct RequireBrandUser {
    pub user: AuthUser,
    pub author_id: DbId,
}

impl FromRequestParts<AppState> for RequireBrandUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let author_id = authorize_note_creation(&user.to_viewer())?;
        Ok(RequireBrandUser { user, author_id })
    }
}
