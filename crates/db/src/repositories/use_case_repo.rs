//! Repository for the `use_cases` table.

use showcase_core::types::DbId;
use showcase_core::use_case::UseCaseDraft;
use sqlx::PgPool;

use crate::models::use_case::UseCaseRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, tags, href, image, created_at, updated_at";

/// Provides CRUD operations for use cases.
pub struct UseCaseRepo;

impl UseCaseRepo {
    /// List every use case, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UseCaseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM use_cases ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, UseCaseRow>(&query).fetch_all(pool).await
    }

    /// Fetch the use cases whose ids are in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<UseCaseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM use_cases WHERE id = ANY($1)");
        sqlx::query_as::<_, UseCaseRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Insert a new use case, returning the created row.
    pub async fn create(pool: &PgPool, input: &UseCaseDraft) -> Result<UseCaseRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO use_cases (title, description, category, tags, href, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UseCaseRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(&input.href)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Replace the editable fields of a use case.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UseCaseDraft,
    ) -> Result<Option<UseCaseRow>, sqlx::Error> {
        let query = format!(
            "UPDATE use_cases SET
                title = $2,
                description = $3,
                category = $4,
                tags = $5,
                href = $6,
                image = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UseCaseRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(&input.href)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a use case. Returns `true` if a row was removed.
    ///
    /// Favorites and recent views pointing at it are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM use_cases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
