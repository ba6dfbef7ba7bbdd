//! Recent view model.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_recent_views` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRecentView {
    pub id: DbId,
    pub user_id: DbId,
    pub use_case_id: DbId,
    pub viewed_at: Timestamp,
}
