//! Staff-only SKU maintenance: create SKUs, record daily metrics, and
//! reconcile aggregate counters.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use merch_core::error::CoreError;
use merch_core::metrics::return_percentage;
use merch_core::sku::{
    validate_content_score, validate_counters, validate_sku_id, validate_sku_name,
};
use merch_db::models::daily_metric::{CreateDailyMetric, DailyMetric, NewDailyMetric};
use merch_db::models::sku::{CreateSku, NewSku, SkuSummary};
use merch_db::repositories::{DailyMetricRepo, SkuRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::skus::load_sku;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

fn validation(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}

/// POST /api/admin/skus/
///
/// `return_percentage` is derived from `sales` and `returns`.
pub async fn create_sku(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSku>,
) -> AppResult<(StatusCode, Json<SkuSummary>)> {
    let sales = input.sales.unwrap_or(0);
    let returns = input.returns.unwrap_or(0);
    let content_score = input.content_score.unwrap_or(0.0);

    validate_sku_id(&input.sku_id).map_err(validation)?;
    validate_sku_name(&input.name).map_err(validation)?;
    validate_counters(sales, returns).map_err(validation)?;
    validate_content_score(content_score).map_err(validation)?;

    let new_sku = NewSku {
        sku_id: input.sku_id,
        name: input.name,
        sales,
        returns,
        return_percentage: return_percentage(sales, returns),
        content_score,
    };
    let sku = SkuRepo::create(&state.pool, &new_sku).await?;

    tracing::info!(user_id = staff.user_id, sku_id = %sku.sku_id, "SKU created");
    Ok((StatusCode::CREATED, Json(SkuSummary::from(sku))))
}

/// POST /api/admin/skus/{sku_id}/daily-metrics/
///
/// A second metric for the same SKU and date is a 409 Conflict.
pub async fn record_daily_metric(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(sku_id): AppPath<String>,
    AppJson(input): AppJson<CreateDailyMetric>,
) -> AppResult<(StatusCode, Json<DailyMetric>)> {
    let returns_units = input.returns_units.unwrap_or(0);
    if input.sales_units < 0 || returns_units < 0 {
        return Err(validation(
            "sales_units and returns_units must be non-negative".into(),
        ));
    }

    let sku = load_sku(&state, &sku_id).await?;
    let metric = DailyMetricRepo::create(
        &state.pool,
        &NewDailyMetric {
            sku_pk: sku.id,
            date: input.date,
            sales_units: input.sales_units,
            returns_units,
        },
    )
    .await?;

    tracing::info!(
        user_id = staff.user_id,
        sku_id = %sku.sku_id,
        date = %metric.date,
        "Daily metric recorded"
    );
    Ok((StatusCode::CREATED, Json(metric)))
}

/// POST /api/admin/skus/{sku_id}/recompute/
///
/// Set `sales`/`returns` to the sums over the SKU's daily metrics and derive
/// `return_percentage` from them, in one transaction.
pub async fn recompute(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(sku_id): AppPath<String>,
) -> AppResult<Json<SkuSummary>> {
    let sku = load_sku(&state, &sku_id).await?;

    let mut tx = state.pool.begin().await?;
    let totals = DailyMetricRepo::totals(&mut *tx, sku.id).await?;
    let percentage = return_percentage(totals.sales, totals.returns);
    let updated = SkuRepo::set_aggregates(&mut *tx, sku.id, &totals, percentage)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SKU", &sku_id)))?;
    tx.commit().await?;

    tracing::info!(
        user_id = staff.user_id,
        sku_id = %updated.sku_id,
        sales = totals.sales,
        returns = totals.returns,
        "SKU aggregates recomputed"
    );
    Ok(Json(SkuSummary::from(updated)))
}
