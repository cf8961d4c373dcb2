//! Bundled sample content
//!
//! The app ships without a backend; the feed, notifications and user
//! directory start from the JSON files under `fixtures/`.

use thiserror::Error;

use crate::feeds::Post;
use crate::notifications::Notification;
use crate::profiles::UserSummary;
use crate::search::SearchResult;

const POSTS_JSON: &str = include_str!("../fixtures/posts.json");
const NOTIFICATIONS_JSON: &str = include_str!("../fixtures/notifications.json");
const DIRECTORY_JSON: &str = include_str!("../fixtures/directory.json");
const SEARCH_TOPICS_JSON: &str = include_str!("../fixtures/search_topics.json");

/// Names a new viewer starts out following
pub const SEED_FOLLOWING: [&str; 3] = ["Sarah Johnson", "Michael Chen", "Emily Rodriguez"];

/// Errors loading bundled content
#[derive(Debug, Error)]
pub enum FixtureError {
    /// JSON parsing error
    #[error("Parse error in {name}: {source}")]
    Parse {
        /// Fixture file name
        name: &'static str,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

fn parse<T: serde::de::DeserializeOwned>(
    name: &'static str,
    json: &str,
) -> Result<T, FixtureError> {
    serde_json::from_str(json).map_err(|source| FixtureError::Parse { name, source })
}

/// Sample feed posts, newest first
pub fn sample_posts() -> Result<Vec<Post>, FixtureError> {
    parse("posts.json", POSTS_JSON)
}

/// Sample notifications, newest first
pub fn sample_notifications() -> Result<Vec<Notification>, FixtureError> {
    parse("notifications.json", NOTIFICATIONS_JSON)
}

/// Sample user directory
pub fn sample_directory() -> Result<Vec<UserSummary>, FixtureError> {
    parse("directory.json", DIRECTORY_JSON)
}

/// Searchable posts and locations, alongside the directory users
pub fn sample_search_topics() -> Result<Vec<SearchResult>, FixtureError> {
    parse("search_topics.json", SEARCH_TOPICS_JSON)
}
