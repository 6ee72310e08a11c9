//! Domain logic for the merchandising operations backend.
//!
//! This crate has no database or HTTP dependencies. Everything here is pure
//! and is exercised directly by unit tests; the `db` and `api` crates feed it
//! pre-loaded data.

pub mod access;
pub mod error;
pub mod metrics;
pub mod notes;
pub mod pagination;
pub mod roles;
pub mod seed;
pub mod sku;
pub mod sku_query;
pub mod types;
