//! Derived SKU metrics: return percentage and the dense daily sales series.

use std::collections::HashMap;

use chrono::Days;
use serde::Serialize;

use crate::types::Date;

/// Default trailing window, in days, for the daily sales series.
pub const DEFAULT_WINDOW_DAYS: u32 = 60;

/// Largest accepted window (one leap year).
pub const MAX_WINDOW_DAYS: u32 = 366;

/// One day of the charted sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySalesPoint {
    /// Serialized as an ISO-8601 `YYYY-MM-DD` string.
    pub date: Date,
    pub sales_units: i32,
}

/// Return percentage of `returns` against `sales`, in `[0, 100]`.
///
/// A SKU with no sales has a return percentage of `0`.
pub fn return_percentage(sales: i64, returns: i64) -> f64 {
    if sales <= 0 || returns <= 0 {
        return 0.0;
    }
    (100.0 * returns as f64 / sales as f64).min(100.0)
}

/// Validate a configured window size.
pub fn validate_window_days(days: u32) -> Result<(), String> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(format!(
            "Metrics window must be between 1 and {MAX_WINDOW_DAYS} days, got {days}"
        ));
    }
    Ok(())
}

/// First date of a `window_days` window ending on `today`.
pub fn window_start(today: Date, window_days: u32) -> Date {
    today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(Date::MIN)
}

/// Build the gap-filled series for `[today - window_days, today]`.
///
/// Produces exactly `window_days + 1` points in ascending date order. Days
/// with no observation get `0`; observations outside the window are ignored.
pub fn daily_sales_series(
    today: Date,
    window_days: u32,
    observed: &[(Date, i32)],
) -> Vec<DailySalesPoint> {
    let start = window_start(today, window_days);
    let by_date: HashMap<Date, i32> = observed
        .iter()
        .filter(|(date, _)| *date >= start && *date <= today)
        .copied()
        .collect();

    start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| DailySalesPoint {
            date,
            sales_units: by_date.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
