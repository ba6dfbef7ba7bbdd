//! Shared response envelope types for API handlers.
//!
//! All API responses except the auth token exchange use a `{ "data": ... }`
//! envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
