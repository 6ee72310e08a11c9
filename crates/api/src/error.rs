//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves the server as `{"error": <message>, "code": <CODE>}`.
//! Internal details are logged and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use merch_core::error::CoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unparseable body or path parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Log `detail` and hide it from the client.
    fn internal(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = match &self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::BadRequest(msg) => Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => Rendered::internal(msg),
        };

        let body = ErrorBody {
            error: rendered.message,
            code: rendered.code,
        };
        (rendered.status, Json(body)).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => Rendered::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => Rendered::internal(msg),
    }
}

/// Message shown for a unique violation on `constraint`.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_skus_sku_id" => "A SKU with this sku_id already exists".into(),
        "uq_daily_metrics_sku_date" => "A daily metric for this SKU and date already exists".into(),
        "uq_users_username" => "A user with this username already exists".into(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Map database failures we can explain to client errors: unique violations
/// (23505) on `uq_` constraints become 409, check violations (23514) on
/// `ck_` constraints become 400, and foreign key violations (23503) on
/// `fk_` constraints become 401 or 404.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => db_err,
        other => return Rendered::internal(other),
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => {
            Rendered::new(StatusCode::CONFLICT, "CONFLICT", conflict_message(constraint))
        }
        Some("23514") if constraint.starts_with("ck_") => Rendered::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        Some("23503") if constraint.starts_with("fk_") => dangling_reference(constraint),
        _ => Rendered::internal(db_err),
    }
}

/// A write referenced a row that is gone. A missing author means the token
/// outlived its user.
fn dangling_reference(constraint: &str) -> Rendered {
    match constraint {
        "fk_notes_created_by" => Rendered::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "User account no longer exists",
        ),
        "fk_notes_sku_pk" | "fk_daily_metrics_sku_pk" => {
            Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "SKU not found")
        }
        other => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Referenced record not found ({other})"),
        ),
    }
}
