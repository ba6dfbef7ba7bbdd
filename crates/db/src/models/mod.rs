//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus the DTOs used to write it.

pub mod consultation;
pub mod favorite;
pub mod recent_view;
pub mod session;
pub mod use_case;
pub mod user;
