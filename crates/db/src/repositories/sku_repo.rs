//! Repository for the `skus` table.

use merch_core::sku_query::{SkuListQuery, SkuOrdering, SkuSortField};
use merch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::daily_metric::MetricTotals;
use crate::models::sku::{NewSku, Sku};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sku_id, name, sales, returns, return_percentage, content_score, \
                        created_at, updated_at";

/// Predicate shared by `list` and `count`.
///
/// `$1` is an escaped `ILIKE` pattern, `$2` an exclusive lower bound on
/// `return_percentage`, `$3` an exclusive upper bound on `content_score`.
/// A `NULL` parameter disables its condition.
const LIST_PREDICATE: &str = "($1::TEXT IS NULL OR name ILIKE $1) \
     AND ($2::FLOAT8 IS NULL OR return_percentage > $2) \
     AND ($3::FLOAT8 IS NULL OR content_score < $3)";

/// Provides CRUD operations for SKUs.
pub struct SkuRepo;

impl SkuRepo {
    /// Insert a new SKU, returning the created row.
    ///
    /// Fails with a unique violation on `uq_skus_sku_id` if the business key
    /// is taken.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewSku,
    ) -> Result<Sku, sqlx::Error> {
        let query = format!(
            "INSERT INTO skus (sku_id, name, sales, returns, return_percentage, content_score)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(&input.sku_id)
            .bind(&input.name)
            .bind(input.sales)
            .bind(input.returns)
            .bind(input.return_percentage)
            .bind(input.content_score)
            .fetch_one(executor)
            .await
    }

    /// Find a SKU by its internal ID.
    ///
    /// The HTTP layer addresses SKUs by `sku_id`; this lookup serves fixtures
    /// and the cascade checks in `tests/repositories.rs`.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skus WHERE id = $1");
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a SKU by its business key.
    pub async fn find_by_sku_id(pool: &PgPool, sku_id: &str) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skus WHERE sku_id = $1");
        sqlx::query_as::<_, Sku>(&query)
            .bind(sku_id)
            .fetch_optional(pool)
            .await
    }

    /// Count SKUs matching the query's search and filter (pagination ignored).
    pub async fn count(pool: &PgPool, params: &SkuListQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM skus WHERE {LIST_PREDICATE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(params.search_pattern())
            .bind(params.filter.and_then(|f| f.min_return_percentage()))
            .bind(params.filter.and_then(|f| f.max_content_score()))
            .fetch_one(pool)
            .await
    }

    /// List one page of SKUs matching the query, in the requested order.
    pub async fn list(pool: &PgPool, params: &SkuListQuery) -> Result<Vec<Sku>, sqlx::Error> {
        let order = order_clause(&params.ordering);
        let query = format!(
            "SELECT {COLUMNS} FROM skus
             WHERE {LIST_PREDICATE}
             ORDER BY {order}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(params.search_pattern())
            .bind(params.filter.and_then(|f| f.min_return_percentage()))
            .bind(params.filter.and_then(|f| f.max_content_score()))
            .bind(params.page.limit())
            .bind(params.page.offset())
            .fetch_all(pool)
            .await
    }

    /// Overwrite the aggregate counters and the derived return percentage.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_aggregates<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        totals: &MetricTotals,
        return_percentage: f64,
    ) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!(
            "UPDATE skus SET sales = $2, returns = $3, return_percentage = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .bind(totals.sales)
            .bind(totals.returns)
            .bind(return_percentage)
            .fetch_optional(executor)
            .await
    }

    /// Hard-delete a SKU. Notes and daily metrics cascade.
    ///
    /// No endpoint deletes SKUs; callers are tests and manual maintenance.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `ORDER BY` clause for a list ordering. The internal id breaks ties so
/// pages never overlap.
fn order_clause(ordering: &SkuOrdering) -> String {
    let column = match ordering.field {
        SkuSortField::Name => "name",
        SkuSortField::Sales => "sales",
        SkuSortField::ReturnPercentage => "return_percentage",
        SkuSortField::ContentScore => "content_score",
    };
    let direction = if ordering.descending { "DESC" } else { "ASC" };
    format!("{column} {direction}, id {direction}")
}
