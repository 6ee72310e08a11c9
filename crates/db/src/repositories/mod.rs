//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! a `PgPool` (or an open transaction) as the first argument.

pub mod daily_metric_repo;
pub mod note_repo;
pub mod role_repo;
pub mod sku_repo;
pub mod user_repo;

pub use daily_metric_repo::DailyMetricRepo;
pub use note_repo::NoteRepo;
pub use role_repo::RoleRepo;
pub use sku_repo::SkuRepo;
pub use user_repo::UserRepo;
