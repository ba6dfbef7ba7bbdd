//! Consultation request intake.
//!
//! Visitors can ask for a new use case, a custom solution, or help with an
//! existing one. Requests are validated here and stored by `showcase-db`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// What the visitor is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryType {
    NewUseCase,
    ExistingQuestion,
    CustomSolution,
    Implementation,
}

impl InquiryType {
    /// Stored value (matches the `consultation_requests.inquiry_type` check).
    pub fn as_str(self) -> &'static str {
        match self {
            InquiryType::NewUseCase => "new-use-case",
            InquiryType::ExistingQuestion => "existing-question",
            InquiryType::CustomSolution => "custom-solution",
            InquiryType::Implementation => "implementation",
        }
    }
}

/// A consultation request as submitted by a visitor.
///
/// Short fields are capped at 200 characters, long ones at 5000.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConsultationInput {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    pub inquiry_type: InquiryType,
    #[validate(length(max = 200))]
    pub use_case_title: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    #[validate(length(max = 5000))]
    pub current_challenges: Option<String>,
    #[validate(length(max = 5000))]
    pub expected_outcome: Option<String>,
}

impl ConsultationInput {
    /// Trim every field, turn blank optionals into `None`, then validate.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: blank_to_none(self.company),
            inquiry_type: self.inquiry_type,
            use_case_title: blank_to_none(self.use_case_title),
            description: self.description.trim().to_string(),
            current_challenges: blank_to_none(self.current_challenges),
            expected_outcome: blank_to_none(self.expected_outcome),
        };
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(input)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
