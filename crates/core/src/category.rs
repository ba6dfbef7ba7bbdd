//! Use case categories and the filter token vocabulary.
//!
//! Categories are the fixed set an admin can assign to a use case. Filter
//! tokens are the labels a viewer can toggle in the catalog sidebar; a token
//! matches a use case when it equals the category or one of its tags.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Fixed category set for use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CustomerService,
    Automation,
    Analytics,
    Marketing,
    Engagement,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CustomerService,
        Category::Automation,
        Category::Analytics,
        Category::Marketing,
        Category::Engagement,
    ];

    /// Stored value of the category (matches the `use_cases.category` column).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::CustomerService => "customer-service",
            Category::Automation => "automation",
            Category::Analytics => "analytics",
            Category::Marketing => "marketing",
            Category::Engagement => "engagement",
        }
    }

    /// Human-readable label, e.g. `"Customer Service"`.
    pub fn label(self) -> &'static str {
        match self {
            Category::CustomerService => "Customer Service",
            Category::Automation => "Automation",
            Category::Analytics => "Analytics",
            Category::Marketing => "Marketing",
            Category::Engagement => "Engagement",
        }
    }

    /// Parse a stored category value. Exact match only.
    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Validate that `value` is one of the known categories.
pub fn validate_category(value: &str) -> Result<Category, CoreError> {
    Category::parse(value).ok_or_else(|| {
        let allowed: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        CoreError::Validation(format!(
            "Invalid category '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    })
}

// ---------------------------------------------------------------------------
// Filter vocabulary
// ---------------------------------------------------------------------------

pub const INDUSTRY_FILTERS: &[&str] = &[
    "Ecommerce",
    "Education",
    "Financial Services",
    "Food and Beverage",
    "Healthcare",
    "Hospitality",
    "Logistics",
    "Manufacturing and Construction",
    "Marketplaces",
    "Media",
    "Real Estate",
    "Software as a Service",
    "Startups",
    "Utilities and Telecoms",
];

pub const TEAM_FILTERS: &[&str] = &[
    "Admin",
    "Analytics",
    "Customer Success",
    "Customer Support",
    "Engineering",
    "Marketing and Sales",
    "Mobile",
    "Operations",
];

pub const INTEGRATION_FILTERS: &[&str] = &[
    "API",
    "BigQuery",
    "DynamoDB",
    "Elasticsearch",
    "Firebase",
    "Firestore",
    "Google Sheets",
    "MongoDB",
    "MySQL",
    "PostgreSQL",
    "React",
    "Redis",
    "SQL Server",
    "Salesforce",
    "SendGrid",
    "Shopify",
    "Stripe",
];

/// One titled group of filter tokens.
#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

/// A category as presented to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything a client needs to render the filter sidebar and the admin
/// category picker.
#[derive(Debug, Clone, Serialize)]
pub struct FilterVocabulary {
    pub groups: Vec<FilterGroup>,
    pub categories: Vec<CategoryOption>,
}

/// Build the filter vocabulary.
pub fn filter_vocabulary() -> FilterVocabulary {
    FilterVocabulary {
        groups: vec![
            FilterGroup {
                name: "industry",
                tokens: INDUSTRY_FILTERS,
            },
            FilterGroup {
                name: "team",
                tokens: TEAM_FILTERS,
            },
            FilterGroup {
                name: "integration",
                tokens: INTEGRATION_FILTERS,
            },
        ],
        categories: Category::ALL
            .iter()
            .map(|c| CategoryOption {
                value: c.as_str(),
                label: c.label(),
            })
            .collect(),
    }
}
