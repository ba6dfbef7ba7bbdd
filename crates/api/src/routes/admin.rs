//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{admin, consultations};
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the `admin` role.
///
/// ```text
/// GET    /use-cases                  -> list_use_cases
/// POST   /use-cases                  -> create_use_case
/// PUT    /use-cases/{id}             -> update_use_case
/// DELETE /use-cases/{id}?confirm=    -> delete_use_case
/// GET    /consultations              -> list_consultations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/use-cases",
            get(admin::list_use_cases).post(admin::create_use_case),
        )
        .route(
            "/use-cases/{id}",
            put(admin::update_use_case).delete(admin::delete_use_case),
        )
        .route("/consultations", get(consultations::list_consultations))
}
