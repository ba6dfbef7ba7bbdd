//! Explicit session context.
//!
//! Operations that depend on identity take an `Option<&Session>` argument
//! instead of reading ambient state, so the unauthenticated path is visible
//! at every call site.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The signed-in user as seen by the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: DbId,
    pub email: String,
    pub role: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Unwrap an optional session or fail with [`CoreError::Unauthorized`].
pub fn require_session(session: Option<&Session>) -> Result<&Session, CoreError> {
    session.ok_or_else(CoreError::unauthenticated)
}
