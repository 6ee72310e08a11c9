//! Demo data loader behind the `merch-seed` binary.
//!
//! Validation happens in `merch_core::seed` before this module is called;
//! everything here runs inside one transaction so a failure leaves the
//! database untouched.

use chrono::Utc;
use merch_core::metrics::return_percentage;
use merch_core::roles::{ROLE_BRAND_USER, ROLE_MERCH_OPS};
use merch_core::seed::{generate_daily_sales, pick_sample_notes, SeedSku};
use merch_core::types::{Date, DbId};
use merch_db::models::daily_metric::NewDailyMetric;
use merch_db::models::sku::NewSku;
use merch_db::models::user::CreateUser;
use merch_db::repositories::{DailyMetricRepo, NoteRepo, RoleRepo, SkuRepo, UserRepo};
use merch_db::DbPool;
use rand::Rng;
use sqlx::PgConnection;

use crate::auth::password::hash_password;

/// Sample accounts created (if missing) on every run: username, email, role.
pub const SAMPLE_USERS: &[(&str, &str, &str)] = &[
    ("branduser1", "brand1@example.com", ROLE_BRAND_USER),
    ("merchops1", "merch1@example.com", ROLE_MERCH_OPS),
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Password(String),
}

#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// Date the generated history ends on.
    pub today: Date,
    /// Replace the file's counters with sums over the generated history.
    pub reconcile: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            today: Utc::now().date_naive(),
            reconcile: false,
        }
    }
}

/// What a seed run wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub skus_created: usize,
    pub metrics_created: u64,
    pub notes_created: usize,
}

/// Create the sample users that do not exist yet and add them to their role.
async fn ensure_sample_users(
    conn: &mut PgConnection,
    password_hash: &str,
) -> Result<usize, SeedError> {
    let mut created = 0;
    for &(username, email, role) in SAMPLE_USERS {
        if let Some(existing) = UserRepo::find_by_username(&mut *conn, username).await? {
            tracing::warn!(username, user_id = existing.id, "Sample user already exists");
            continue;
        }
        let user = UserRepo::create(
            &mut *conn,
            &CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                is_staff: false,
            },
        )
        .await?;
        RoleRepo::assign(&mut *conn, user.id, role).await?;
        tracing::info!(username, user_id = user.id, role, "Created sample user");
        created += 1;
    }
    Ok(created)
}

async fn seed_sku<R: Rng + ?Sized>(
    conn: &mut PgConnection,
    rng: &mut R,
    record: &SeedSku,
    options: SeedOptions,
    report: &mut SeedReport,
) -> Result<DbId, SeedError> {
    let sku = SkuRepo::create(
        &mut *conn,
        &NewSku {
            sku_id: record.sku_id.clone(),
            name: record.name.clone(),
            sales: record.sales,
            returns: record.returns(),
            return_percentage: record.return_percentage,
            content_score: record.content_score,
        },
    )
    .await?;

    let history: Vec<NewDailyMetric> = generate_daily_sales(rng, options.today, record.sales)
        .into_iter()
        .map(|m| NewDailyMetric {
            sku_pk: sku.id,
            date: m.date,
            sales_units: m.sales_units,
            returns_units: 0,
        })
        .collect();
    if history.is_empty() {
        tracing::warn!(sku_id = %sku.sku_id, "SKU has no sales, no daily metrics generated");
    }
    report.metrics_created += DailyMetricRepo::bulk_create(&mut *conn, &history).await?;

    for text in pick_sample_notes(rng) {
        NoteRepo::create(&mut *conn, sku.id, None, text).await?;
        report.notes_created += 1;
    }

    if options.reconcile {
        let totals = DailyMetricRepo::totals(&mut *conn, sku.id).await?;
        let percentage = return_percentage(totals.sales, totals.returns);
        SkuRepo::set_aggregates(&mut *conn, sku.id, &totals, percentage).await?;
    }

    report.skus_created += 1;
    Ok(sku.id)
}

/// Load validated records, sample users, history, and notes in one
/// transaction.
pub async fn run_seed<R: Rng + ?Sized>(
    pool: &DbPool,
    rng: &mut R,
    records: &[SeedSku],
    user_password: &str,
    options: SeedOptions,
) -> Result<SeedReport, SeedError> {
    let password_hash =
        hash_password(user_password).map_err(|e| SeedError::Password(e.to_string()))?;

    let mut tx = pool.begin().await?;
    let mut report = SeedReport {
        users_created: ensure_sample_users(&mut tx, &password_hash).await?,
        ..SeedReport::default()
    };

    for record in records {
        seed_sku(&mut tx, rng, record, options, &mut report).await?;
    }

    tx.commit().await?;
    tracing::info!(
        users = report.users_created,
        skus = report.skus_created,
        metrics = report.metrics_created,
        notes = report.notes_created,
        reconciled = options.reconcile,
        "Seed complete"
    );
    Ok(report)
}
