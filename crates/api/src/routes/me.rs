//! Route definitions for `/me`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require authentication.
///
/// ```text
/// GET    /favorites        -> list_favorites
/// DELETE /favorites/{id}   -> remove_favorite
/// GET    /recent           -> list_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(me::list_favorites))
        .route("/favorites/{id}", delete(me::remove_favorite))
        .route("/recent", get(me::list_recent))
}
