//! Repository for the `notes` table.
//!
//! Every read joins `skus` so the returned [`Note`] carries the business
//! `sku_id` of its owner.

use merch_core::access::NoteScope;
use merch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::note::Note;

/// Column list for joined note queries (`n` = notes, `s` = skus).
const COLUMNS: &str = "n.id, n.sku_pk, s.sku_id AS sku, n.text, n.created_at, n.created_by";

/// Provides note persistence. Notes are never deleted through this repo.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note. `created_at` is always the database clock.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        sku_pk: DbId,
        created_by: Option<DbId>,
        text: &str,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "WITH n AS (
                INSERT INTO notes (sku_pk, text, created_by)
                VALUES ($1, $2, $3)
                RETURNING id, sku_pk, text, created_at, created_by
             )
             SELECT {COLUMNS} FROM n JOIN skus s ON s.id = n.sku_pk"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(sku_pk)
            .bind(text)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// List the notes on a SKU that fall inside `scope`, newest first.
    pub async fn list_for_sku(
        pool: &PgPool,
        sku_pk: DbId,
        scope: NoteScope,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let author = match scope {
            NoteScope::None => return Ok(Vec::new()),
            NoteScope::All => None,
            NoteScope::AuthoredBy(user_id) => Some(user_id),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notes n JOIN skus s ON s.id = n.sku_pk
             WHERE n.sku_pk = $1 AND ($2::BIGINT IS NULL OR n.created_by = $2)
             ORDER BY n.created_at DESC, n.id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(sku_pk)
            .bind(author)
            .fetch_all(pool)
            .await
    }

    /// Find a note only if it was authored by `author`.
    pub async fn find_authored(
        pool: &PgPool,
        id: DbId,
        author: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes n JOIN skus s ON s.id = n.sku_pk
             WHERE n.id = $1 AND n.created_by = $2"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(author)
            .fetch_optional(pool)
            .await
    }

    /// Replace the text of a note authored by `author`.
    ///
    /// Author and creation time are untouched. Returns `None` if the note does
    /// not exist or belongs to someone else.
    pub async fn update_text_authored(
        pool: &PgPool,
        id: DbId,
        author: DbId,
        text: &str,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "WITH n AS (
                UPDATE notes SET text = $3
                WHERE id = $1 AND created_by = $2
                RETURNING id, sku_pk, text, created_at, created_by
             )
             SELECT {COLUMNS} FROM n JOIN skus s ON s.id = n.sku_pk"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(author)
            .bind(text)
            .fetch_optional(pool)
            .await
    }
}
