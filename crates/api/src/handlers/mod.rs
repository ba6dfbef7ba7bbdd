pub mod admin;
pub mod auth;
pub mod consultations;
pub mod me;
pub mod use_cases;
