//! Route definitions for individual notes.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// ```text
/// GET   /notes/{id}/  -> get_by_id
/// PATCH /notes/{id}/  -> patch
/// PUT   /notes/{id}/  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/notes/{id}/",
        get(notes::get_by_id)
            .patch(notes::patch)
            .put(notes::update),
    )
}
