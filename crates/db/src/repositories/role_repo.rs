//! Repository for the `roles` and `user_roles` tables.

use merch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

/// Role membership lookups.
pub struct RoleRepo;

impl RoleRepo {
    /// Names of all roles the user is a member of, alphabetically.
    pub async fn names_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Add the user to the named role.
    ///
    /// Returns `false` if the role does not exist or the user already holds it.
    pub async fn assign<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: DbId,
        role_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role_id)
             SELECT $1, id FROM roles WHERE name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_name)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
