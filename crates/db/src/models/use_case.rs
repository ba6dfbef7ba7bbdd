//! Use case row model.

use showcase_core::types::{DbId, Timestamp};
use showcase_core::use_case::{normalize_image_path, UseCase};
use sqlx::FromRow;

/// A row from the `use_cases` table.
#[derive(Debug, Clone, FromRow)]
pub struct UseCaseRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub href: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UseCaseRow> for UseCase {
    fn from(row: UseCaseRow) -> Self {
        UseCase {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            tags: row.tags,
            href: row.href,
            image: normalize_image_path(&row.image),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
