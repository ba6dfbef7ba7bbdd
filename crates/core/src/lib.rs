//! Domain logic for the use case showcase.
//!
//! This crate has no database or HTTP dependencies. Persistence is reached
//! through the traits in [`store`], so the tracker and the admin editor can be
//! exercised against an in-memory store in tests and against PostgreSQL in
//! production (`showcase-db`).

pub mod admin_editor;
pub mod category;
pub mod consultation;
pub mod error;
pub mod roles;
pub mod search;
pub mod session;
pub mod store;
pub mod tag_input;
pub mod tracker;
pub mod types;
pub mod use_case;

#[cfg(test)]
pub(crate) mod testing;
