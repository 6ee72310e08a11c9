//! Daily metric model and DTOs.

use merch_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `daily_metrics` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyMetric {
    pub id: DbId,
    #[serde(skip)]
    pub sku_pk: DbId,
    pub date: Date,
    pub sales_units: i32,
    pub returns_units: i32,
    pub created_at: Timestamp,
}

/// Request body for recording one day of metrics through the admin API.
#[derive(Debug, Deserialize)]
pub struct CreateDailyMetric {
    pub date: Date,
    pub sales_units: i32,
    pub returns_units: Option<i32>,
}

/// A daily metric ready to insert.
#[derive(Debug, Clone, Copy)]
pub struct NewDailyMetric {
    pub sku_pk: DbId,
    pub date: Date,
    pub sales_units: i32,
    pub returns_units: i32,
}

/// Sales and returns summed over all of a SKU's daily metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct MetricTotals {
    pub sales: i64,
    pub returns: i64,
}
