//! In-memory search and filtering over the use case catalog.
//!
//! Everything here is pure: the catalog is loaded once per request and the
//! subset is recomputed from the query text, the active filter tokens, and
//! the full list. There is no relevance scoring; results keep input order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::use_case::UseCase;

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// The set of filter tokens a viewer has switched on.
///
/// Transient: built from the request, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    tokens: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `filters` query parameter.
    ///
    /// Segments are trimmed and empty segments are ignored, so `"a, ,b"`
    /// yields `{a, b}`.
    pub fn from_query_param(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Switch a token on if it is off, off if it is on.
    ///
    /// Returns `true` when the token is active after the call.
    pub fn toggle(&mut self, token: &str) -> bool {
        if self.tokens.remove(token) {
            false
        } else {
            self.tokens.insert(token.to_string());
            true
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of active tokens (shown as "Clear all (N)").
    pub fn active_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl FromIterator<String> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Case-insensitive substring test of the query against title, description
/// and tags. An empty query matches everything.
///
/// The query is deliberately not trimmed: `" "` only matches records that
/// contain a space.
pub fn matches_query(use_case: &UseCase, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    use_case.title.to_lowercase().contains(&needle)
        || use_case.description.to_lowercase().contains(&needle)
        || use_case
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter-token test. An empty selection matches everything.
///
/// A record matches when its category is one of the tokens (exact), or when
/// one of its tags equals a token ignoring case.
pub fn matches_filters(use_case: &UseCase, filters: &FilterSelection) -> bool {
    if filters.is_empty() {
        return true;
    }
    if filters.contains(&use_case.category) {
        return true;
    }
    use_case
        .tags
        .iter()
        .any(|tag| filters.iter().any(|token| tag.to_lowercase() == token.to_lowercase()))
}

/// Return the ordered subset of `use_cases` matching both the query and the
/// active filters.
pub fn filter_use_cases<'a>(
    use_cases: &'a [UseCase],
    query: &str,
    filters: &FilterSelection,
) -> Vec<&'a UseCase> {
    use_cases
        .iter()
        .filter(|uc| matches_query(uc, query) && matches_filters(uc, filters))
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A search result together with the counts shown above the grid
/// ("Showing N of M use cases").
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub items: Vec<UseCase>,
    /// Number of items after filtering.
    pub shown: usize,
    /// Size of the full catalog.
    pub total: usize,
    /// Number of active filter tokens.
    pub active_filters: usize,
}

/// Run [`filter_use_cases`] and package the result with its counts.
pub fn search(use_cases: &[UseCase], query: &str, filters: &FilterSelection) -> SearchOutcome {
    let items: Vec<UseCase> = filter_use_cases(use_cases, query, filters)
        .into_iter()
        .cloned()
        .collect();
    SearchOutcome {
        shown: items.len(),
        total: use_cases.len(),
        active_filters: filters.active_count(),
        items,
    }
}
