//! Repository for the `user_favorites` table.

use showcase_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::UserFavorite;

/// Column list for `user_favorites` queries.
const COLUMNS: &str = "id, user_id, use_case_id, created_at";

/// Provides operations on a user's favorite marks.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Mark a use case as a favorite.
    ///
    /// A second mark for the same pair violates
    /// `uq_user_favorites_user_use_case`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        use_case_id: DbId,
    ) -> Result<UserFavorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_favorites (user_id, use_case_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserFavorite>(&query)
            .bind(user_id)
            .bind(use_case_id)
            .fetch_one(pool)
            .await
    }

    /// List a user's favorites, most recently favorited first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserFavorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_favorites
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, UserFavorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a favorite mark. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, use_case_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND use_case_id = $2")
                .bind(user_id)
                .bind(use_case_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
