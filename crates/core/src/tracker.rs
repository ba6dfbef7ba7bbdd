//! Per-viewer favorites and recent views.
//!
//! [`ActivityTracker`] holds the viewer's favorite ids and recent list as last
//! confirmed by the store. Local state only changes after the store call it
//! mirrors has succeeded, so a failed write never leaves the tracker claiming
//! something the store does not hold.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::session::{require_session, Session};
use crate::store::{resolve_in_order, ActivityStore, RECENT_VIEW_LIMIT};
use crate::types::DbId;
use crate::use_case::UseCase;

/// Result of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    /// Whether the use case is a favorite after the toggle.
    pub fn is_favorite(self) -> bool {
        matches!(self, FavoriteToggle::Added)
    }
}

pub struct ActivityTracker<'s, S: ActivityStore + ?Sized> {
    store: &'s S,
    favorite_ids: HashSet<DbId>,
    recent: Vec<UseCase>,
}

impl<'s, S: ActivityStore + ?Sized> ActivityTracker<'s, S> {
    /// A tracker with no synced state. Every identity-dependent call still
    /// checks the session it is given.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            favorite_ids: HashSet::new(),
            recent: Vec::new(),
        }
    }

    /// Load the viewer's favorite ids and recent list.
    ///
    /// Anonymous viewers get an empty tracker without touching the store.
    pub async fn load(store: &'s S, session: Option<&Session>) -> Result<Self, CoreError> {
        let mut tracker = Self::load_favorites(store, session).await?;
        if let Some(session) = session {
            tracker.recent = tracker.fetch_recent(session.user_id).await?;
        }
        Ok(tracker)
    }

    /// Like [`load`](Self::load) but only syncs favorite ids; the recent list
    /// stays empty.
    pub async fn load_favorites(
        store: &'s S,
        session: Option<&Session>,
    ) -> Result<Self, CoreError> {
        let mut tracker = Self::new(store);
        if let Some(session) = session {
            tracker.favorite_ids = store
                .favorite_ids(session.user_id)
                .await?
                .into_iter()
                .collect();
        }
        Ok(tracker)
    }

    pub fn is_favorite(&self, use_case_id: DbId) -> bool {
        self.favorite_ids.contains(&use_case_id)
    }

    /// Favorite ids in ascending order.
    pub fn favorite_ids(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self.favorite_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The recent list as of the last sync.
    pub fn recent(&self) -> &[UseCase] {
        &self.recent
    }

    /// Flip the favorite mark for `use_case_id`.
    ///
    /// Check-then-act against the synced set: a favorite is deleted, anything
    /// else is inserted. The local set changes only after the store confirms.
    pub async fn toggle_favorite(
        &mut self,
        session: Option<&Session>,
        use_case_id: DbId,
    ) -> Result<FavoriteToggle, CoreError> {
        let session = require_session(session)?;

        if self.favorite_ids.contains(&use_case_id) {
            self.store
                .delete_favorite(session.user_id, use_case_id)
                .await?;
            self.favorite_ids.remove(&use_case_id);
            tracing::debug!(user_id = session.user_id, use_case_id, "Favorite removed");
            Ok(FavoriteToggle::Removed)
        } else {
            self.store
                .insert_favorite(session.user_id, use_case_id)
                .await?;
            self.favorite_ids.insert(use_case_id);
            tracing::debug!(user_id = session.user_id, use_case_id, "Favorite added");
            Ok(FavoriteToggle::Added)
        }
    }

    /// Remove a favorite mark if present. Idempotent.
    ///
    /// Returns `true` if a mark was deleted.
    pub async fn remove_favorite(
        &mut self,
        session: Option<&Session>,
        use_case_id: DbId,
    ) -> Result<bool, CoreError> {
        let session = require_session(session)?;
        let removed = self
            .store
            .delete_favorite(session.user_id, use_case_id)
            .await?;
        self.favorite_ids.remove(&use_case_id);
        Ok(removed)
    }

    /// Record that the viewer opened a use case, then refresh the recent list.
    ///
    /// Best effort: anonymous views and ids with no use case behind them are
    /// ignored, store failures are logged and dropped.
    pub async fn track_view(&mut self, session: Option<&Session>, use_case_id: DbId) {
        let Some(session) = session else {
            return;
        };

        match self.store.get_by_ids(&[use_case_id]).await {
            Ok(found) if found.is_empty() => {
                tracing::debug!(
                    user_id = session.user_id,
                    use_case_id,
                    "Ignoring view of unknown use case",
                );
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    user_id = session.user_id,
                    use_case_id,
                    error = %e,
                    "Failed to look up viewed use case",
                );
                return;
            }
        }

        if let Err(e) = self
            .store
            .upsert_recent_view(session.user_id, use_case_id)
            .await
        {
            tracing::warn!(
                user_id = session.user_id,
                use_case_id,
                error = %e,
                "Failed to record recent view",
            );
            return;
        }

        match self.fetch_recent(session.user_id).await {
            Ok(recent) => self.recent = recent,
            Err(e) => tracing::warn!(
                user_id = session.user_id,
                error = %e,
                "Failed to refresh recent views",
            ),
        }
    }

    /// The viewer's most recently viewed use cases, newest first.
    ///
    /// Views of deleted use cases are skipped.
    pub async fn list_recent(
        &mut self,
        session: Option<&Session>,
    ) -> Result<Vec<UseCase>, CoreError> {
        let session = require_session(session)?;
        self.recent = self.fetch_recent(session.user_id).await?;
        Ok(self.recent.clone())
    }

    /// The viewer's favorites, most recently favorited first.
    ///
    /// Marks on deleted use cases are skipped. Also resyncs the local set.
    pub async fn list_favorites(
        &mut self,
        session: Option<&Session>,
    ) -> Result<Vec<UseCase>, CoreError> {
        let session = require_session(session)?;
        let ids = self.store.favorite_ids(session.user_id).await?;
        let favorites = resolve_in_order(self.store, &ids).await?;
        self.favorite_ids = ids.into_iter().collect();
        Ok(favorites)
    }

    async fn fetch_recent(&self, user_id: DbId) -> Result<Vec<UseCase>, CoreError> {
        let ids = self.store.recent_view_ids(user_id, RECENT_VIEW_LIMIT).await?;
        Ok(resolve_in_order(self.store, &ids).await?)
    }
}
