//! SKU field constraints shared by the admin API and the seeder.

/// Maximum length of a `sku_id`, matching the column width.
pub const MAX_SKU_ID_LENGTH: usize = 100;

/// Maximum length of a SKU name, matching the column width.
pub const MAX_SKU_NAME_LENGTH: usize = 255;

/// A business key must be non-blank, unpadded, and fit its column.
pub fn validate_sku_id(sku_id: &str) -> Result<(), String> {
    if sku_id.trim().is_empty() {
        return Err("sku_id must not be blank".into());
    }
    if sku_id.trim() != sku_id {
        return Err("sku_id must not have leading or trailing whitespace".into());
    }
    if sku_id.chars().count() > MAX_SKU_ID_LENGTH {
        return Err(format!("sku_id exceeds {MAX_SKU_ID_LENGTH} characters"));
    }
    Ok(())
}

pub fn validate_sku_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be blank".into());
    }
    if name.chars().count() > MAX_SKU_NAME_LENGTH {
        return Err(format!("name exceeds {MAX_SKU_NAME_LENGTH} characters"));
    }
    Ok(())
}

/// Sales and return counters are cumulative unit counts.
pub fn validate_counters(sales: i64, returns: i64) -> Result<(), String> {
    if sales < 0 {
        return Err(format!("sales must be non-negative, got {sales}"));
    }
    if returns < 0 {
        return Err(format!("returns must be non-negative, got {returns}"));
    }
    Ok(())
}

pub fn validate_content_score(score: f64) -> Result<(), String> {
    if !score.is_finite() {
        return Err("content_score must be a finite number".into());
    }
    Ok(())
}
