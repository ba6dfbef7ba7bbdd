//! Handlers for the signed-in viewer's own activity (`/me`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::tracker::ActivityTracker;
use showcase_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/favorites
///
/// Most recently favorited first; marks on deleted use cases are skipped.
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let mut tracker = ActivityTracker::new(&catalog);
    let favorites = tracker.list_favorites(Some(&session)).await?;
    Ok(Json(DataResponse { data: favorites }))
}

/// DELETE /api/v1/me/favorites/{id}
///
/// Idempotent: 204 whether or not a mark existed.
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let catalog = state.catalog();
    let mut tracker = ActivityTracker::new(&catalog);
    let removed = tracker.remove_favorite(Some(&session), id).await?;
    tracing::debug!(user_id = session.user_id, use_case_id = id, removed, "Favorite remove");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/me/recent
pub async fn list_recent(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let mut tracker = ActivityTracker::new(&catalog);
    let recent = tracker.list_recent(Some(&session)).await?;
    Ok(Json(DataResponse { data: recent }))
}
