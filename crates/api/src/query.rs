//! Shared query parameter types for API handlers.

use serde::Deserialize;
use showcase_core::search::FilterSelection;

/// `GET /use-cases?q=&filters=`.
///
/// `filters` is a comma-separated list of tokens. `q` is used as given; it is
/// not trimmed.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub filters: Option<String>,
}

impl SearchParams {
    pub fn selection(&self) -> FilterSelection {
        self.filters
            .as_deref()
            .map(FilterSelection::from_query_param)
            .unwrap_or_default()
    }
}

/// `?confirm=true` gate for destructive admin actions.
///
/// Kept as a string so any other value is an unconfirmed request answered
/// with the JSON error envelope, not a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    pub confirm: Option<String>,
}

impl ConfirmParams {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("true")
    }
}
