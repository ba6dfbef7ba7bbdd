//! PostgreSQL implementation of the domain store traits.

use async_trait::async_trait;
use showcase_core::store::{ActivityStore, BackendError, UseCaseStore};
use showcase_core::types::DbId;
use showcase_core::use_case::{UseCase, UseCaseDraft};
use sqlx::PgPool;

use crate::repositories::{FavoriteRepo, RecentViewRepo, UseCaseRepo};

/// The catalog and per-user activity, backed by a connection pool.
///
/// Cheap to construct: the pool is reference counted.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> BackendError {
    tracing::error!(error = %e, "Store call failed");
    BackendError::new(e)
}

#[async_trait]
impl UseCaseStore for PgCatalog {
    async fn list_all(&self) -> Result<Vec<UseCase>, BackendError> {
        let rows = UseCaseRepo::list(&self.pool).await.map_err(backend)?;
        Ok(rows.into_iter().map(UseCase::from).collect())
    }

    async fn get_by_ids(&self, ids: &[DbId]) -> Result<Vec<UseCase>, BackendError> {
        let rows = UseCaseRepo::find_by_ids(&self.pool, ids)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(UseCase::from).collect())
    }

    async fn insert(&self, draft: &UseCaseDraft) -> Result<UseCase, BackendError> {
        let row = UseCaseRepo::create(&self.pool, draft)
            .await
            .map_err(backend)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        patch: &UseCaseDraft,
    ) -> Result<Option<UseCase>, BackendError> {
        let row = UseCaseRepo::update(&self.pool, id, patch)
            .await
            .map_err(backend)?;
        Ok(row.map(UseCase::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, BackendError> {
        UseCaseRepo::delete(&self.pool, id).await.map_err(backend)
    }
}

#[async_trait]
impl ActivityStore for PgCatalog {
    async fn favorite_ids(&self, user_id: DbId) -> Result<Vec<DbId>, BackendError> {
        let rows = FavoriteRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(|f| f.use_case_id).collect())
    }

    /// A mark that already exists counts as inserted.
    async fn insert_favorite(&self, user_id: DbId, use_case_id: DbId) -> Result<(), BackendError> {
        match FavoriteRepo::create(&self.pool, user_id, use_case_id).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(user_id, use_case_id, "Favorite already present");
                Ok(())
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete_favorite(&self, user_id: DbId, use_case_id: DbId) -> Result<bool, BackendError> {
        FavoriteRepo::delete(&self.pool, user_id, use_case_id)
            .await
            .map_err(backend)
    }

    async fn upsert_recent_view(&self, user_id: DbId, use_case_id: DbId) -> Result<(), BackendError> {
        RecentViewRepo::record(&self.pool, user_id, use_case_id)
            .await
            .map_err(backend)
    }

    async fn recent_view_ids(&self, user_id: DbId, limit: i64) -> Result<Vec<DbId>, BackendError> {
        let rows = RecentViewRepo::list_recent(&self.pool, user_id, limit)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(|v| v.use_case_id).collect())
    }
}
