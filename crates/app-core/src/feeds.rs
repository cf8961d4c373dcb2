//! Home feed and follow-gated visibility
//!
//! This module holds the feed post type and the visibility rule deciding
//! which posts a viewer sees:
//!
//! - `Provide` accounts see the whole feed, regardless of who they follow.
//! - `Want` accounts see only posts by authors they follow.
//!
//! The rule is a pure function of its inputs and keeps no state. Callers
//! recompute it whenever the follow set or account type changes.

use serde::{Deserialize, Serialize};

use app_state::follow::{AccountType, FollowSet, FollowSnapshot};

/// A post in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier
    pub id: u64,

    /// Display name of the author
    pub author_display_name: String,

    /// Avatar glyph of the author
    #[serde(default)]
    pub author_avatar: String,

    /// Body text
    pub content: String,

    /// Pickup location
    pub location: String,

    /// Relative timestamp label ("2 hours ago")
    pub time_ago: String,

    /// Attached image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Like count
    #[serde(default)]
    pub likes: u32,

    /// Comment count
    #[serde(default)]
    pub comments: u32,
}

impl Post {
    /// Whether `name` wrote this post
    pub fn is_authored_by(&self, name: &str) -> bool {
        self.author_display_name == name
    }
}

/// Posts visible to a viewer, in input order
///
/// `Provide` viewers get every post. `Want` viewers get the posts whose
/// author is in `following`; with an empty follow set that is nothing.
pub fn visible_posts<'a>(
    posts: &'a [Post],
    account_type: AccountType,
    following: &FollowSet,
) -> Vec<&'a Post> {
    match account_type {
        AccountType::Provide => posts.iter().collect(),
        AccountType::Want => posts
            .iter()
            .filter(|post| following.contains(&post.author_display_name))
            .collect(),
    }
}

/// What the home feed should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView<'a> {
    /// Visible posts, in feed order
    Posts(Vec<&'a Post>),
    /// There are no posts at all
    NoPosts,
    /// A `Want` viewer who follows nobody
    NotFollowingAnyone,
    /// A `Want` viewer whose followed authors have not posted
    NothingFromFollowed,
}

impl<'a> FeedView<'a> {
    /// Visible posts (empty for every empty state)
    pub fn posts(&self) -> &[&'a Post] {
        match self {
            FeedView::Posts(posts) => posts,
            _ => &[],
        }
    }

    /// Whether nothing is visible
    pub fn is_empty(&self) -> bool {
        self.posts().is_empty()
    }

    /// Empty-state message, if the feed is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            FeedView::Posts(_) => None,
            FeedView::NoPosts => Some("No posts yet"),
            FeedView::NotFollowingAnyone => {
                Some("Follow providers to see their food offers here")
            }
            FeedView::NothingFromFollowed => {
                Some("The providers you follow haven't posted yet")
            }
        }
    }
}

/// Compute the home feed, telling the empty states apart
pub fn filter_feed<'a>(
    posts: &'a [Post],
    account_type: AccountType,
    following: &FollowSet,
) -> FeedView<'a> {
    if posts.is_empty() {
        return FeedView::NoPosts;
    }

    if account_type == AccountType::Want && following.is_empty() {
        return FeedView::NotFollowingAnyone;
    }

    let visible = visible_posts(posts, account_type, following);
    if visible.is_empty() {
        FeedView::NothingFromFollowed
    } else {
        FeedView::Posts(visible)
    }
}

/// Compute the home feed from a follow graph snapshot
pub fn feed_for_snapshot<'a>(posts: &'a [Post], snapshot: &FollowSnapshot) -> FeedView<'a> {
    filter_feed(posts, snapshot.account_type, &snapshot.following)
}
