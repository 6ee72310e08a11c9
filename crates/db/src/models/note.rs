//! Note model and DTOs.

use merch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A note joined with its SKU's business key.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    #[serde(skip)]
    pub sku_pk: DbId,
    /// Business `sku_id` of the owning SKU.
    pub sku: String,
    pub text: String,
    pub created_at: Timestamp,
    /// `None` once the author's account has been removed.
    pub created_by: Option<DbId>,
}

/// Body of `POST /skus/{sku_id}/notes/`.
///
/// Author and timestamp are never read from the request.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub text: String,
}

/// Body of `PATCH /notes/{id}/`.
#[derive(Debug, Deserialize)]
pub struct UpdateNote {
    pub text: Option<String>,
}

/// Body of `PUT /notes/{id}/`.
#[derive(Debug, Deserialize)]
pub struct ReplaceNote {
    pub text: String,
}
