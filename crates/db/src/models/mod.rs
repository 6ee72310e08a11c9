//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the API writes the table

pub mod daily_metric;
pub mod note;
pub mod sku;
pub mod user;
