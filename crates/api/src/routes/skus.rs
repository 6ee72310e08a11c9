//! Route definitions for the `/skus` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::skus;
use crate::state::AppState;

/// ```text
/// GET  /skus/                   -> list
/// GET  /skus/{sku_id}/          -> get_detail
/// POST /skus/{sku_id}/notes/    -> create_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skus/", get(skus::list))
        .route("/skus/{sku_id}/", get(skus::get_detail))
        .route("/skus/{sku_id}/notes/", post(skus::create_note))
}
