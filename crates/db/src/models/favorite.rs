//! Favorite mark model.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserFavorite {
    pub id: DbId,
    pub user_id: DbId,
    pub use_case_id: DbId,
    pub created_at: Timestamp,
}
