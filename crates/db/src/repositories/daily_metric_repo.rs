//! Repository for the `daily_metrics` table.

use merch_core::types::{Date, DbId};
use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::models::daily_metric::{DailyMetric, MetricTotals, NewDailyMetric};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sku_pk, date, sales_units, returns_units, created_at";

/// Rows per multi-row INSERT; four binds each keeps well under the
/// PostgreSQL bind-parameter limit.
const INSERT_CHUNK_SIZE: usize = 1_000;

/// Provides insert and aggregate queries for daily metrics. There is no
/// update path: a day's figures are immutable once written.
pub struct DailyMetricRepo;

impl DailyMetricRepo {
    /// Insert one day of metrics.
    ///
    /// Fails with a unique violation on `uq_daily_metrics_sku_date` if the
    /// SKU already has a row for that date.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewDailyMetric,
    ) -> Result<DailyMetric, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_metrics (sku_pk, date, sales_units, returns_units)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyMetric>(&query)
            .bind(input.sku_pk)
            .bind(input.date)
            .bind(input.sales_units)
            .bind(input.returns_units)
            .fetch_one(executor)
            .await
    }

    /// Insert many rows with multi-row INSERT statements. Returns the number
    /// of rows written.
    pub async fn bulk_create(
        conn: &mut PgConnection,
        rows: &[NewDailyMetric],
    ) -> Result<u64, sqlx::Error> {
        let mut written = 0;
        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO daily_metrics (sku_pk, date, sales_units, returns_units) ",
            );
            builder.push_values(chunk, |mut row, metric| {
                row.push_bind(metric.sku_pk)
                    .push_bind(metric.date)
                    .push_bind(metric.sales_units)
                    .push_bind(metric.returns_units);
            });
            written += builder.build().execute(&mut *conn).await?.rows_affected();
        }
        tracing::debug!(rows = written, "Bulk inserted daily metrics");
        Ok(written)
    }

    /// `(date, sales_units)` for each recorded day in `[start, end]`.
    pub async fn sales_between(
        pool: &PgPool,
        sku_pk: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<(Date, i32)>, sqlx::Error> {
        sqlx::query_as::<_, (Date, i32)>(
            "SELECT date, sales_units FROM daily_metrics
             WHERE sku_pk = $1 AND date BETWEEN $2 AND $3
             ORDER BY date ASC",
        )
        .bind(sku_pk)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Sum sales and returns over every recorded day of a SKU.
    pub async fn totals<'e, E: PgExecutor<'e>>(
        executor: E,
        sku_pk: DbId,
    ) -> Result<MetricTotals, sqlx::Error> {
        sqlx::query_as::<_, MetricTotals>(
            "SELECT COALESCE(SUM(sales_units), 0)::BIGINT AS sales,
                    COALESCE(SUM(returns_units), 0)::BIGINT AS returns
             FROM daily_metrics
             WHERE sku_pk = $1",
        )
        .bind(sku_pk)
        .fetch_one(executor)
        .await
    }
}
