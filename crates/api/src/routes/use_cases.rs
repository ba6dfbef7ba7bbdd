//! Route definitions for the public `/use-cases` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::use_cases;
use crate::state::AppState;

/// Routes mounted at `/use-cases`.
///
/// ```text
/// GET  /                 -> list_use_cases
/// GET  /filters          -> get_filters
/// GET  /{id}             -> get_use_case
/// POST /{id}/view        -> track_view
/// POST /{id}/favorite    -> toggle_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(use_cases::list_use_cases))
        .route("/filters", get(use_cases::get_filters))
        .route("/{id}", get(use_cases::get_use_case))
        .route("/{id}/view", post(use_cases::track_view))
        .route("/{id}/favorite", post(use_cases::toggle_favorite))
}
