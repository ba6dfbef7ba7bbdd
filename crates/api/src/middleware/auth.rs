//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showcase_core::error::CoreError;
use showcase_core::session::Session;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.0.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

/// The viewer's session if the request carries a Bearer token.
///
/// A missing header yields `None`. A header that is present but malformed,
/// expired, or badly signed is still rejected with 401 so clients know to
/// refresh instead of silently browsing anonymously.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Session>);

impl OptionalAuthUser {
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_session(parts, state)? {
            Some(session) => Ok(AuthUser(session)),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))),
        }
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(bearer_session(parts, state)?))
    }
}

fn bearer_session(parts: &Parts, state: &AppState) -> Result<Option<Session>, AppError> {
    let Some(auth_header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = state.config.jwt.verify(token).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(Some(claims.session()))
}
