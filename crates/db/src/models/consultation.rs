//! Consultation request model.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `consultation_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsultationRequest {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub inquiry_type: String,
    pub use_case_title: Option<String>,
    pub description: String,
    pub current_challenges: Option<String>,
    pub expected_outcome: Option<String>,
    pub created_at: Timestamp,
}
