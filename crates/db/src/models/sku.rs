//! SKU model and DTOs.

use merch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `skus` table.
#[derive(Debug, Clone, FromRow)]
pub struct Sku {
    pub id: DbId,
    pub sku_id: String,
    pub name: String,
    pub sales: i64,
    pub returns: i64,
    pub return_percentage: f64,
    pub content_score: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The public list representation of a SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuSummary {
    pub sku_id: String,
    pub name: String,
    pub sales: i64,
    pub return_percentage: f64,
    pub content_score: f64,
}

impl From<Sku> for SkuSummary {
    fn from(sku: Sku) -> Self {
        Self {
            sku_id: sku.sku_id,
            name: sku.name,
            sales: sku.sales,
            return_percentage: sku.return_percentage,
            content_score: sku.content_score,
        }
    }
}

/// Request body for creating a SKU through the admin API.
///
/// `return_percentage` is not accepted; it is derived from `sales` and
/// `returns`.
#[derive(Debug, Deserialize)]
pub struct CreateSku {
    pub sku_id: String,
    pub name: String,
    pub sales: Option<i64>,
    pub returns: Option<i64>,
    pub content_score: Option<f64>,
}

/// A fully resolved SKU ready to insert.
#[derive(Debug, Clone)]
pub struct NewSku {
    pub sku_id: String,
    pub name: String,
    pub sales: i64,
    pub returns: i64,
    pub return_percentage: f64,
    pub content_score: f64,
}
