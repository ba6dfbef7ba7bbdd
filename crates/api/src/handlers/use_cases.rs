//! Handlers for the public `/use-cases` resource: search, detail, filter
//! vocabulary, view tracking, and favorite toggling.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use showcase_core::category::filter_vocabulary;
use showcase_core::error::CoreError;
use showcase_core::search::{search, SearchOutcome};
use showcase_core::store::UseCaseStore;
use showcase_core::tracker::ActivityTracker;
use showcase_core::types::DbId;
use showcase_core::use_case::UseCase;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Search result plus the viewer's favorite ids (empty when anonymous).
#[derive(Debug, Serialize)]
pub struct UseCaseListing {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    pub favorite_ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteState {
    pub use_case_id: DbId,
    pub is_favorite: bool,
}

/// GET /api/v1/use-cases?q=&filters=
///
/// The whole catalog is loaded and filtered in memory.
pub async fn list_use_cases(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let all = catalog.list_all().await?;
    let tracker = ActivityTracker::load_favorites(&catalog, viewer.session()).await?;

    let outcome = search(&all, &params.q, &params.selection());
    tracing::debug!(
        shown = outcome.shown,
        total = outcome.total,
        active_filters = outcome.active_filters,
        "Use case search",
    );

    Ok(Json(DataResponse {
        data: UseCaseListing {
            outcome,
            favorite_ids: tracker.favorite_ids(),
        },
    }))
}

/// GET /api/v1/use-cases/filters
pub async fn get_filters() -> impl IntoResponse {
    Json(DataResponse {
        data: filter_vocabulary(),
    })
}

/// GET /api/v1/use-cases/{id}
pub async fn get_use_case(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let use_case = find_use_case(&state, id).await?;
    Ok(Json(DataResponse { data: use_case }))
}

/// POST /api/v1/use-cases/{id}/view
///
/// Best effort: always 204. Anonymous views are ignored.
pub async fn track_view(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> StatusCode {
    let catalog = state.catalog();
    let mut tracker = ActivityTracker::new(&catalog);
    tracker.track_view(viewer.session(), id).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/use-cases/{id}/favorite
///
/// Flip the viewer's favorite mark. Requires a session.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog();
    let mut tracker = ActivityTracker::load_favorites(&catalog, viewer.session()).await?;

    // Only new marks need a live target; stale ones can always be removed.
    if viewer.session().is_some() && !tracker.is_favorite(id) {
        find_use_case(&state, id).await?;
    }

    let toggle = tracker.toggle_favorite(viewer.session(), id).await?;

    Ok(Json(DataResponse {
        data: FavoriteState {
            use_case_id: id,
            is_favorite: toggle.is_favorite(),
        },
    }))
}

async fn find_use_case(state: &AppState, id: DbId) -> AppResult<UseCase> {
    state
        .catalog()
        .get_by_ids(&[id])
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UseCase",
            id,
        }))
}
