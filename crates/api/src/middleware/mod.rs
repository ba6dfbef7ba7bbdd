//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- requires a valid Bearer token.
//! - [`auth::OptionalAuthUser`] -- a session if a Bearer token is present.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
