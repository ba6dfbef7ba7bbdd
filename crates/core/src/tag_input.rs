//! Tag input decoding for the admin form.
//!
//! Tags arrive either as free text (`"ai, chat, ops"`) or as a JSON list.
//! Free text is split on commas, so a tag cannot contain a comma when typed
//! that way; a list is taken as-is.

use serde::{Deserialize, Serialize};

/// Tags as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    List(Vec<String>),
    Text(String),
}

impl Default for TagInput {
    fn default() -> Self {
        TagInput::Text(String::new())
    }
}

impl TagInput {
    /// Decode into the stored tag list. Segments are trimmed, empties dropped.
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagInput::Text(text) => parse_tag_text(&text),
            TagInput::List(list) => list
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

/// Split comma-separated tag text.
pub fn parse_tag_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render stored tags back into the text field when editing.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
