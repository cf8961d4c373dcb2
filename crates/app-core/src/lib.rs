//! Core application logic for DonateSome
//!
//! This crate contains the domain logic shared by the screens: feed
//! visibility, post composition, notifications, the user directory and
//! search.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod feeds;
pub mod fixtures;
pub mod notifications;
pub mod posts;
pub mod profiles;
pub mod search;

pub use feeds::{feed_for_snapshot, filter_feed, visible_posts, FeedView, Post};
pub use notifications::{Notification, NotificationInbox, NotificationKind};
pub use posts::{compose_post, LocalFeed, PostDraft, PostError};
pub use profiles::{followed_profiles, suggested_providers, UserSummary};
pub use search::{
    search, search_index, RecentSearches, SearchResult, SearchResultKind, MAX_RECENT_SEARCHES,
};
