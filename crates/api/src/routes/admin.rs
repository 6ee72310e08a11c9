//! Route definitions for staff-only SKU maintenance.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// POST /admin/skus/                          -> create_sku
/// POST /admin/skus/{sku_id}/daily-metrics/   -> record_daily_metric
/// POST /admin/skus/{sku_id}/recompute/       -> recompute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/skus/", post(admin::create_sku))
        .route(
            "/admin/skus/{sku_id}/daily-metrics/",
            post(admin::record_daily_metric),
        )
        .route("/admin/skus/{sku_id}/recompute/", post(admin::recompute))
}
