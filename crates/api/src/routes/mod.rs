pub mod admin;
pub mod auth;
pub mod health;
pub mod notes;
pub mod pages;
pub mod skus;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Paths keep their trailing slash; a request without it does not match.
///
/// ```text
/// /auth/login/                              login (public)
/// /auth/logout/                             logout (clears cookie)
///
/// /skus/                                    list (search, filter_type, ordering, page, page_size)
/// /skus/{sku_id}/                           detail with notes and daily series
/// /skus/{sku_id}/notes/                     create note (brand_user only)
///
/// /notes/{id}/                              get, patch, put (own notes, brand_user only)
///
/// /admin/skus/                              create SKU (staff only)
/// /admin/skus/{sku_id}/daily-metrics/       record daily metric (staff only)
/// /admin/skus/{sku_id}/recompute/           recompute aggregates (staff only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(skus::router())
        .merge(notes::router())
        .merge(admin::router())
}
