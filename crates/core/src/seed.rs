//! Demo data: seed file parsing, validation, and synthetic history.
//!
//! The seeder validates the complete input before anything is written so a
//! bad record aborts the load instead of leaving a partial catalog behind.

use std::collections::HashSet;

use chrono::Days;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::CoreError;
use crate::sku::{
    validate_content_score, validate_counters, validate_sku_id, MAX_SKU_NAME_LENGTH,
};
use crate::types::Date;

/// Number of days of synthetic history generated per SKU.
pub const SEED_HISTORY_DAYS: u32 = 365;

/// Largest `sales` a record may carry. The jittered daily figure (up to 1.5x
/// the daily average) must still fit `sales_units`.
pub const MAX_SEED_SALES: i64 = i32::MAX as i64 * SEED_HISTORY_DAYS as i64 * 2 / 3;

/// Upper bound on sample notes attached to a single SKU.
pub const MAX_SAMPLE_NOTES_PER_SKU: usize = 3;

/// Canned note texts used for sample notes.
pub const SAMPLE_NOTE_TEXTS: &[&str] = &[
    "Customer feedback indicates strong satisfaction.",
    "Consider reviewing product images for better conversion.",
    "High return rate, investigate common issues.",
    "Marketing campaign for this SKU is performing well.",
    "Competitor analysis suggests price adjustment might be needed.",
    "Content score is low, needs optimization.",
    "Positive reviews are increasing, good sign.",
    "Check inventory levels, sales are spiking.",
];

fn default_name() -> String {
    "N/A".to_string()
}

/// One record of the seed file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedSku {
    pub sku_id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub sales: i64,
    #[serde(default)]
    pub return_percentage: f64,
    #[serde(default)]
    pub content_score: f64,
}

impl SeedSku {
    /// Return units implied by the seeded sales and return percentage.
    pub fn returns(&self) -> i64 {
        (self.sales as f64 * self.return_percentage / 100.0).round() as i64
    }
}

/// A generated daily sales figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMetric {
    pub date: Date,
    pub sales_units: i32,
}

/// Parse the seed file contents (a JSON array of records).
pub fn parse_seed_file(contents: &str) -> Result<Vec<SeedSku>, CoreError> {
    serde_json::from_str(contents)
        .map_err(|e| CoreError::Validation(format!("Malformed seed file: {e}")))
}

/// Validate every record, reporting the first problem with its position.
pub fn validate_seed_records(records: &[SeedSku]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let fail = |msg: String| CoreError::Validation(format!("Record {index}: {msg}"));

        validate_sku_id(&record.sku_id).map_err(fail)?;
        // Names may be blank in the source data; only the width is enforced.
        if record.name.chars().count() > MAX_SKU_NAME_LENGTH {
            return Err(fail(format!(
                "name exceeds {MAX_SKU_NAME_LENGTH} characters"
            )));
        }
        validate_counters(record.sales, 0).map_err(fail)?;
        if record.sales > MAX_SEED_SALES {
            return Err(fail(format!(
                "sales exceeds {MAX_SEED_SALES}, got {}",
                record.sales
            )));
        }
        if !(0.0..=100.0).contains(&record.return_percentage) {
            return Err(fail(format!(
                "return_percentage must be within 0..=100, got {}",
                record.return_percentage
            )));
        }
        validate_content_score(record.content_score).map_err(fail)?;
        let sku_id = record.sku_id.as_str();
        if !seen.insert(sku_id) {
            return Err(CoreError::Conflict(format!(
                "Record {index}: duplicate sku_id '{sku_id}' in seed file"
            )));
        }
    }
    Ok(())
}

/// Spread `total_sales` over the [`SEED_HISTORY_DAYS`] days ending `today`.
///
/// Each day gets the daily average jittered by up to ±50%, rounded and
/// floored at zero. SKUs without sales get no history. `total_sales` is
/// expected to be validated against [`MAX_SEED_SALES`].
pub fn generate_daily_sales<R: Rng + ?Sized>(
    rng: &mut R,
    today: Date,
    total_sales: i64,
) -> Vec<GeneratedMetric> {
    if total_sales <= 0 {
        return Vec::new();
    }
    let average = total_sales as f64 / f64::from(SEED_HISTORY_DAYS);
    let spread = average * 0.5;

    (0..SEED_HISTORY_DAYS)
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let jitter: f64 = rng.random_range(-spread..=spread);
            let units = (average + jitter).round().max(0.0);
            GeneratedMetric {
                date,
                sales_units: units as i32,
            }
        })
        .collect()
}

/// Pick between zero and [`MAX_SAMPLE_NOTES_PER_SKU`] canned note texts.
pub fn pick_sample_notes<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let count = rng.random_range(0..=MAX_SAMPLE_NOTES_PER_SKU);
    (0..count)
        .filter_map(|_| SAMPLE_NOTE_TEXTS.choose(rng).copied())
        .collect()
}
