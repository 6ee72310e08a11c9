//! `merch-seed [PATH] [--reconcile]`
//!
//! Loads SKUs from a JSON file (default `dummy_sku.json`), generates a year
//! of daily sales per SKU and a few sample notes, and creates the sample
//! users. The whole file is validated before anything is written.

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merch_api::auth::password::{validate_password_strength, MIN_PASSWORD_LENGTH};
use merch_api::seed::{run_seed, SeedOptions};
use merch_core::seed::{parse_seed_file, validate_seed_records};

const DEFAULT_SEED_FILE: &str = "dummy_sku.json";
const DEFAULT_USER_PASSWORD: &str = "password123";

struct Args {
    path: String,
    reconcile: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut path = None;
    let mut reconcile = false;
    for arg in std::env::args().skip(1) {
        if arg == "--reconcile" {
            reconcile = true;
        } else if arg.starts_with("--") {
            bail!("unknown flag '{arg}'");
        } else if path.is_some() {
            bail!("only one seed file may be given");
        } else {
            path = Some(arg);
        }
    }
    Ok(Args {
        path: path.unwrap_or_else(|| DEFAULT_SEED_FILE.to_string()),
        reconcile,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merch_api=info,merch_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;

    let contents = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read seed file '{}'", args.path))?;
    let records = parse_seed_file(&contents)?;
    validate_seed_records(&records)?;
    tracing::info!(path = %args.path, records = records.len(), "Seed file validated");

    let password =
        std::env::var("SEED_USER_PASSWORD").unwrap_or_else(|_| DEFAULT_USER_PASSWORD.into());
    validate_password_strength(&password, MIN_PASSWORD_LENGTH)
        .map_err(anyhow::Error::msg)
        .context("SEED_USER_PASSWORD is too weak")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = merch_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    merch_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let options = SeedOptions {
        reconcile: args.reconcile,
        ..SeedOptions::default()
    };
    let report = run_seed(&pool, &mut rand::rng(), &records, &password, options)
        .await
        .context("seeding failed, no changes were written")?;

    println!(
        "Seeded {} SKUs, {} daily metrics, {} notes, {} new users",
        report.skus_created, report.metrics_created, report.notes_created, report.users_created
    );
    Ok(())
}
