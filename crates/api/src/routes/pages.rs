//! Route definitions for the HTML pages (mounted at the root, not under `/api`).

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /                 -> dashboard
/// GET /skus/{sku_id}/   -> sku_detail (login required)
/// GET /login/           -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/skus/{sku_id}/", get(pages::sku_detail))
        .route("/login/", get(pages::login))
}
