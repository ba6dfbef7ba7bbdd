//! Use case catalog records.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Default link for a use case that has no landing page yet.
pub const DEFAULT_HREF: &str = "#";

/// Default preview image for newly created use cases.
pub const DEFAULT_IMAGE: &str = "/assets/support-preview.jpg";

/// Legacy prefix found on image paths written by the first admin panel.
const LEGACY_IMAGE_PREFIX: &str = "/src/";

/// A catalog entry describing one product scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub href: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated field set for inserting or fully updating a use case.
///
/// Produced by [`crate::admin_editor::UseCaseForm::to_draft`]; the store never
/// sees unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub href: String,
    pub image: String,
}

/// Rewrite legacy `/src/...` image paths to the served `/...` path.
///
/// Paths without the legacy prefix (including absolute URLs) are returned
/// unchanged.
pub fn normalize_image_path(image: &str) -> String {
    match image.strip_prefix(LEGACY_IMAGE_PREFIX) {
        Some(rest) => format!("/{rest}"),
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_image_prefix_is_rewritten() {
        assert_eq!(
            normalize_image_path("/src/assets/api-preview.jpg"),
            "/assets/api-preview.jpg"
        );
    }

    #[test]
    fn other_image_paths_are_untouched() {
        assert_eq!(normalize_image_path(DEFAULT_IMAGE), DEFAULT_IMAGE);
        assert_eq!(
            normalize_image_path("https://cdn.example.com/src/a.png"),
            "https://cdn.example.com/src/a.png"
        );
        assert_eq!(normalize_image_path(""), "");
    }
}
