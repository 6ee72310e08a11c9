//! Login and logout.
//!
//! A successful login answers with the token in the body for API clients and
//! sets it as the `merch_token` cookie for the HTML pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use merch_core::error::CoreError;
use merch_core::types::DbId;
use merch_db::models::user::User;
use merch_db::repositories::{RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::auth::TOKEN_COOKIE;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub roles: Vec<String>,
    pub is_staff: bool,
}

/// Look up `username` and check the password.
///
/// Unknown users and wrong passwords share one 401. Deactivated accounts
/// get 403, and only once the password matched.
async fn authenticate(state: &AppState, input: &LoginRequest) -> AppResult<User> {
    let rejected =
        || AppError::from(CoreError::Unauthorized("Invalid username or password".into()));

    let Some(user) = UserRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::info!(username = %input.username, "Login rejected: unknown user");
        return Err(rejected());
    };

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| {
            AppError::InternalError(format!("Stored hash for user {} is unusable: {e}", user.id))
        })?;
    if !matches {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(rejected());
    }

    if !user.is_active {
        tracing::info!(user_id = user.id, "Login rejected: account deactivated");
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }
    Ok(user)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/login/
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let user = authenticate(&state, &input).await?;

    let roles = RoleRepo::names_for_user(&state.pool, user.id).await?;
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &roles, user.is_staff, jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;

    tracing::info!(user_id = user.id, roles = ?roles, is_staff = user.is_staff, "Login succeeded");

    let jar = jar.add(session_cookie(access_token.clone()));
    let body = AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.expires_in_secs(),
        user: UserInfo {
            id: user.id,
            username: user.username,
            roles,
            is_staff: user.is_staff,
        },
    };
    Ok((jar, Json(body)))
}

/// POST /api/auth/logout/
///
/// Expires the session cookie and answers 204. Bearer tokens are stateless;
/// clients drop them.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}
