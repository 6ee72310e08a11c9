//! Token authentication for handlers and pages.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use merch_core::access::Viewer;
use merch_core::error::CoreError;
use merch_core::roles::parse_role_names;
use merch_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::auth::TOKEN_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// The caller identified by a valid access token.
///
/// Looks for `Authorization: Bearer <token>` first and falls back to the
/// `merch_token` cookie the login sets. Rejects with 401 when neither yields
/// a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role names as issued at login.
    pub roles: Vec<String>,
    pub is_staff: bool,
}

impl AuthUser {
    /// The policy-layer view of this user. Unknown role names are dropped.
    pub fn to_viewer(&self) -> Viewer {
        Viewer::user(self.user_id, parse_role_names(&self.roles), self.is_staff)
    }
}

/// Pull the raw token from the request, preferring the header.
fn token_from_parts(parts: &Parts) -> Result<Option<String>, AppError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header.to_str().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization header".into(),
            ))
        })?;
        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;
        return Ok(Some(token.to_string()));
    }

    let jar = CookieJar::from_headers(&parts.headers);
    Ok(jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authentication credentials were not provided".into(),
            ))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            roles: claims.roles,
            is_staff: claims.is_staff,
        })
    }
}

/// Optional authentication for pages that render for anonymous visitors.
///
/// Missing or invalid credentials yield `MaybeAuthUser(None)` instead of a
/// rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn to_viewer(&self) -> Viewer {
        self.0
            .as_ref()
            .map_or(Viewer::Anonymous, AuthUser::to_viewer)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
