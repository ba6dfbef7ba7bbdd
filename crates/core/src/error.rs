use crate::store::BackendError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The action requires a signed-in user and no session was supplied.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A read or write against the store failed. Never retried.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl CoreError {
    /// The error returned when an identity-dependent action has no session.
    pub fn unauthenticated() -> Self {
        CoreError::Unauthorized("Sign in to continue".into())
    }
}
