//! Search functionality
//!
//! This module provides the search screen's logic: matching people, posts
//! and locations against a query, and the list of recent searches.

use serde::{Deserialize, Serialize};

use crate::profiles::UserSummary;

/// Number of recent searches kept
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Types of search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultKind {
    /// A person
    User,
    /// A post or campaign
    Post,
    /// A city with active donations
    Location,
}

impl SearchResultKind {
    /// Icon name shown when the result has no avatar
    pub fn icon(&self) -> &'static str {
        match self {
            SearchResultKind::User => "person",
            SearchResultKind::Post => "article",
            SearchResultKind::Location => "location-on",
        }
    }

    /// Background color of the icon
    pub fn accent_color(&self) -> &'static str {
        match self {
            SearchResultKind::User => "#007AFF",
            SearchResultKind::Post => "#34C759",
            SearchResultKind::Location => "#FF9500",
        }
    }
}

/// A searchable entry
///
/// Ids are unique within one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Entry identifier
    pub id: u64,

    /// Kind of entry
    #[serde(rename = "type")]
    pub kind: SearchResultKind,

    /// Main line
    pub title: String,

    /// Secondary line
    pub subtitle: String,

    /// Avatar glyph, for people
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SearchResult {
    /// Whether the title or subtitle contains `query_lower`
    fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.subtitle.to_lowercase().contains(query_lower)
    }
}

impl From<&UserSummary> for SearchResult {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id,
            kind: SearchResultKind::User,
            title: user.name.clone(),
            subtitle: user.location.clone(),
            avatar: Some(user.avatar.clone()).filter(|avatar| !avatar.is_empty()),
        }
    }
}

/// Build the search index: directory users first, then other topics
pub fn search_index(directory: &[UserSummary], topics: Vec<SearchResult>) -> Vec<SearchResult> {
    directory
        .iter()
        .map(SearchResult::from)
        .chain(topics)
        .collect()
}

/// Entries whose title or subtitle contains `query`, ignoring case
///
/// Results keep index order. An empty query matches nothing.
pub fn search<'a>(results: &'a [SearchResult], query: &str) -> Vec<&'a SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    results
        .iter()
        .filter(|result| result.matches(&query_lower))
        .collect()
}

/// Recently submitted queries, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    queries: Vec<String>,
}

impl RecentSearches {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries, newest first
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Number of stored queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether no query is stored
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Record a submitted query
    ///
    /// The trimmed query goes to the front and the oldest entry beyond
    /// [`MAX_RECENT_SEARCHES`] is dropped. Blank queries and queries already
    /// in the list are ignored. Returns whether the list changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.queries.iter().any(|q| q == query) {
            return false;
        }

        self.queries.insert(0, query.to_string());
        self.queries.truncate(MAX_RECENT_SEARCHES);
        true
    }

    /// Forget all recent searches
    pub fn clear(&mut self) {
        self.queries.clear();
    }
}
