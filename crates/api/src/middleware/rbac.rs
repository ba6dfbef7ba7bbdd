//! Role checks layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showcase_core::error::CoreError;
use showcase_core::session::Session;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's session, guaranteed to carry the `admin` role.
///
/// No token gives 401; a non-admin token gives 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(session) = AuthUser::from_request_parts(parts, state).await?;
        if !session.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(session))
    }
}
