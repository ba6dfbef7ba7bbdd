pub mod admin;
pub mod auth;
pub mod consultations;
pub mod health;
pub mod me;
pub mod use_cases;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                         signup (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current user (requires auth)
///
/// /use-cases                           search (optional auth)
/// /use-cases/filters                   filter vocabulary
/// /use-cases/{id}                      detail
/// /use-cases/{id}/view                 track view (POST, best effort)
/// /use-cases/{id}/favorite             toggle favorite (POST, requires auth)
///
/// /me/favorites                        list (requires auth)
/// /me/favorites/{id}                   remove (DELETE)
/// /me/recent                           recently viewed
///
/// /consultations                       submit request (public POST)
///
/// /admin/use-cases                     list, create (admin only)
/// /admin/use-cases/{id}                update, delete (?confirm=true)
/// /admin/consultations                 list submitted requests
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/use-cases", use_cases::router())
        .nest("/me", me::router())
        .nest("/consultations", consultations::router())
        .nest("/admin", admin::router())
}
