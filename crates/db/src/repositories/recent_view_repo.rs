//! Repository for the `user_recent_views` table.

use showcase_core::types::DbId;
use sqlx::PgPool;

use crate::models::recent_view::UserRecentView;

/// Column list for `user_recent_views` queries.
const COLUMNS: &str = "id, user_id, use_case_id, viewed_at";

/// Provides operations on a user's recent views.
pub struct RecentViewRepo;

impl RecentViewRepo {
    /// Record a view of a use case.
    ///
    /// Delegates to the `update_recent_view` function, which inserts the row
    /// or bumps `viewed_at` on the existing one in a single statement.
    pub async fn record(pool: &PgPool, user_id: DbId, use_case_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT update_recent_view($1, $2)")
            .bind(user_id)
            .bind(use_case_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Get a user's recent views ordered by `viewed_at` descending.
    ///
    /// The `limit` should already be validated by the caller.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<UserRecentView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_recent_views
             WHERE user_id = $1
             ORDER BY viewed_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, UserRecentView>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
