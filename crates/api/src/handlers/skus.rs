//! Handlers for the `/skus` resource: list, detail, and note creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use merch_core::access::note_scope;
use merch_core::error::CoreError;
use merch_core::metrics::{daily_sales_series, window_start, DailySalesPoint};
use merch_core::notes::validate_note_text;
use merch_core::pagination::Page;
use merch_core::sku_query::SkuListQuery;
use merch_db::models::note::{CreateNote, Note};
use merch_db::models::sku::{Sku, SkuSummary};
use merch_db::repositories::{DailyMetricRepo, NoteRepo, SkuRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireBrandUser;
use crate::state::AppState;

/// Raw query parameters for `GET /skus/`. Parsed into a [`SkuListQuery`].
#[derive(Debug, Default, Deserialize)]
pub struct SkuListParams {
    pub search: Option<String>,
    pub filter_type: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl SkuListParams {
    fn parse(&self) -> Result<SkuListQuery, CoreError> {
        SkuListQuery::parse(
            self.search.as_deref(),
            self.filter_type.as_deref(),
            self.ordering.as_deref(),
            self.page.as_deref(),
            self.page_size.as_deref(),
        )
    }
}

/// SKU detail: the list fields plus role-filtered notes and the gap-filled
/// sales series.
#[derive(Debug, Serialize)]
pub struct SkuDetail {
    #[serde(flatten)]
    pub sku: SkuSummary,
    pub notes: Vec<Note>,
    pub daily_metrics: Vec<DailySalesPoint>,
}

/// Look up a SKU by business key or fail with 404.
pub(crate) async fn load_sku(state: &AppState, sku_id: &str) -> AppResult<Sku> {
    SkuRepo::find_by_sku_id(&state.pool, sku_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SKU", sku_id)))
}

/// GET /api/skus/?search=&filter_type=&ordering=&page=&page_size=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SkuListParams>,
) -> AppResult<Json<Page<SkuSummary>>> {
    let query = params.parse()?;

    let count = SkuRepo::count(&state.pool, &query).await?;
    query.page.ensure_in_range(count)?;

    let results = SkuRepo::list(&state.pool, &query)
        .await?
        .into_iter()
        .map(SkuSummary::from)
        .collect();

    Ok(Json(Page::new(&query.page, count, results)))
}

/// GET /api/skus/{sku_id}/
///
/// Notes are filtered by the caller's roles; the series covers the configured
/// trailing window ending today (UTC).
pub async fn get_detail(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(sku_id): AppPath<String>,
) -> AppResult<Json<SkuDetail>> {
    let sku = load_sku(&state, &sku_id).await?;

    let scope = note_scope(&auth.to_viewer());
    let notes = NoteRepo::list_for_sku(&state.pool, sku.id, scope).await?;

    let today = Utc::now().date_naive();
    let window = state.config.metrics_window_days;
    let observed =
        DailyMetricRepo::sales_between(&state.pool, sku.id, window_start(today, window), today)
            .await?;
    let daily_metrics = daily_sales_series(today, window, &observed);

    Ok(Json(SkuDetail {
        sku: SkuSummary::from(sku),
        notes,
        daily_metrics,
    }))
}

/// POST /api/skus/{sku_id}/notes/
///
/// Only `brand_user` members may add notes; the role is checked before the
/// SKU is looked up. Author and timestamp come from the server.
pub async fn create_note(
    author: RequireBrandUser,
    State(state): State<AppState>,
    AppPath(sku_id): AppPath<String>,
    AppJson(input): AppJson<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    validate_note_text(&input.text).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let sku = load_sku(&state, &sku_id).await?;
    let note = NoteRepo::create(&state.pool, sku.id, Some(author.author_id), &input.text).await?;

    tracing::info!(
        user_id = author.user.user_id,
        note_id = note.id,
        sku_id = %sku.sku_id,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(note)))
}
