//! Store traits: the contract the domain layer needs from persistence.
//!
//! [`UseCaseStore`] is the catalog itself; [`ActivityStore`] holds the
//! per-user favorite marks and recent views. Both fail with [`BackendError`]
//! and neither retries.

use async_trait::async_trait;

use crate::types::DbId;
use crate::use_case::{UseCase, UseCaseDraft};

/// Number of recent views a viewer sees.
pub const RECENT_VIEW_LIMIT: i64 = 5;

/// A failed read or write against the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Backend error: {cause}")]
pub struct BackendError {
    pub cause: String,
}

impl BackendError {
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }
}

/// Typed access to the `use_cases` resource.
#[async_trait]
pub trait UseCaseStore: Send + Sync {
    /// Every use case, most recently created first.
    async fn list_all(&self) -> Result<Vec<UseCase>, BackendError>;

    /// The use cases whose ids are in `ids`. Unknown ids are skipped; order
    /// is unspecified.
    async fn get_by_ids(&self, ids: &[DbId]) -> Result<Vec<UseCase>, BackendError>;

    async fn insert(&self, draft: &UseCaseDraft) -> Result<UseCase, BackendError>;

    /// Replace the editable fields of a use case. `None` if it does not exist.
    async fn update(&self, id: DbId, patch: &UseCaseDraft)
        -> Result<Option<UseCase>, BackendError>;

    /// Delete a use case. `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, BackendError>;
}

/// Typed access to `user_favorites` and `user_recent_views`.
#[async_trait]
pub trait ActivityStore: UseCaseStore {
    /// Favorited use case ids for a user, most recently favorited first.
    async fn favorite_ids(&self, user_id: DbId) -> Result<Vec<DbId>, BackendError>;

    async fn insert_favorite(&self, user_id: DbId, use_case_id: DbId)
        -> Result<(), BackendError>;

    /// `false` if no mark existed.
    async fn delete_favorite(&self, user_id: DbId, use_case_id: DbId)
        -> Result<bool, BackendError>;

    /// Insert the view or move its `viewed_at` to now, in one server-side call.
    async fn upsert_recent_view(&self, user_id: DbId, use_case_id: DbId)
        -> Result<(), BackendError>;

    /// Viewed use case ids, most recent first, at most `limit`.
    async fn recent_view_ids(&self, user_id: DbId, limit: i64)
        -> Result<Vec<DbId>, BackendError>;
}

/// Resolve `ids` to full records in the order of `ids`.
///
/// Ids with no backing use case (deleted since they were recorded) are
/// dropped without error.
pub async fn resolve_in_order<S: UseCaseStore + ?Sized>(
    store: &S,
    ids: &[DbId],
) -> Result<Vec<UseCase>, BackendError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = store.get_by_ids(ids).await?;
    let mut ordered = Vec::with_capacity(found.len());
    for id in ids {
        if let Some(pos) = found.iter().position(|uc| uc.id == *id) {
            ordered.push(found.swap_remove(pos));
        }
    }
    Ok(ordered)
}
