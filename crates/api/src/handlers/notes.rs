//! Handlers for individual notes (`/notes/{id}/`).
//!
//! Retrieval and edits are limited to the caller's own notes, and only while
//! the caller holds `brand_user`. Anything outside that set is reported as
//! not found.

use axum::extract::State;
use axum::Json;
use merch_core::access::note_edit_scope;
use merch_core::error::CoreError;
use merch_core::notes::validate_note_text;
use merch_core::types::DbId;
use merch_db::models::note::{Note, ReplaceNote, UpdateNote};
use merch_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn note_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Note", id))
}

/// The author id the caller may act as, or 404.
fn editable_author(auth: &AuthUser, id: DbId) -> AppResult<DbId> {
    note_edit_scope(&auth.to_viewer()).ok_or_else(|| note_not_found(id))
}

async fn replace_text(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
    author: DbId,
    text: &str,
) -> AppResult<Note> {
    validate_note_text(text).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let note = NoteRepo::update_text_authored(&state.pool, id, author, text)
        .await?
        .ok_or_else(|| note_not_found(id))?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, sku_id = %note.sku, "Note updated");
    Ok(note)
}

/// GET /api/notes/{id}/
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Note>> {
    let author = editable_author(&auth, id)?;
    let note = NoteRepo::find_authored(&state.pool, id, author)
        .await?
        .ok_or_else(|| note_not_found(id))?;
    Ok(Json(note))
}

/// PATCH /api/notes/{id}/
///
/// A body without `text` leaves the note unchanged.
pub async fn patch(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateNote>,
) -> AppResult<Json<Note>> {
    let author = editable_author(&auth, id)?;
    let note = match input.text {
        Some(text) => replace_text(&state, &auth, id, author, &text).await?,
        None => NoteRepo::find_authored(&state.pool, id, author)
            .await?
            .ok_or_else(|| note_not_found(id))?,
    };
    Ok(Json(note))
}

/// PUT /api/notes/{id}/
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ReplaceNote>,
) -> AppResult<Json<Note>> {
    let author = editable_author(&auth, id)?;
    let note = replace_text(&state, &auth, id, author, &input.text).await?;
    Ok(Json(note))
}
