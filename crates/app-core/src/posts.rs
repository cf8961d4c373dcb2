//! Post composition and the session-local feed
//!
//! Providers create food offers from a draft. Posts only live in memory for
//! the current session; nothing is sent anywhere or persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::feeds::Post;
use app_state::follow::AccountType;

/// Time label for freshly created posts
pub const JUST_NOW: &str = "Just now";

/// Post composition error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// Only provider accounts may post
    #[error("Only provider accounts can create posts")]
    NotAProvider,

    /// Description is missing
    #[error("Please describe the food you are providing")]
    EmptyContent,

    /// Location is missing
    #[error("Please provide a location")]
    EmptyLocation,
}

/// Result type for post operations
pub type Result<T> = std::result::Result<T, PostError>;

/// Draft of a new post, as typed into the create-post form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    /// Description of the food offered
    pub content: String,
    /// Pickup location
    pub location: String,
    /// Picked image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PostDraft {
    /// Create a draft without an image
    pub fn new(content: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            location: location.into(),
            image: None,
        }
    }

    /// Attach an image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// All problems with the draft, in form order
    pub fn validate(&self) -> Vec<PostError> {
        let mut errors = Vec::new();
        if self.content.trim().is_empty() {
            errors.push(PostError::EmptyContent);
        }
        if self.location.trim().is_empty() {
            errors.push(PostError::EmptyLocation);
        }
        errors
    }
}

/// Turn a draft into a post
///
/// Content and location are trimmed. Returns the first problem found when
/// the author is not a provider or the draft is incomplete.
pub fn compose_post(
    author: &str,
    author_avatar: &str,
    account_type: AccountType,
    draft: PostDraft,
    id: u64,
) -> Result<Post> {
    if !account_type.can_author_posts() {
        return Err(PostError::NotAProvider);
    }
    if let Some(error) = draft.validate().into_iter().next() {
        return Err(error);
    }

    Ok(Post {
        id,
        author_display_name: author.to_string(),
        author_avatar: author_avatar.to_string(),
        content: draft.content.trim().to_string(),
        location: draft.location.trim().to_string(),
        time_ago: JUST_NOW.to_string(),
        image: draft.image,
        likes: 0,
        comments: 0,
    })
}

/// The session's feed posts
///
/// Cloning yields another handle to the same feed. New posts are shown
/// first.
#[derive(Clone, Default)]
pub struct LocalFeed {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl LocalFeed {
    /// Create a feed holding `posts`
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    /// Copy of all posts, newest first
    pub async fn posts(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Number of posts
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Whether the feed has no posts
    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Compose a post from `draft` and put it at the top of the feed
    pub async fn publish(
        &self,
        author: &str,
        author_avatar: &str,
        account_type: AccountType,
        draft: PostDraft,
    ) -> Result<Post> {
        let mut posts = self.posts.write().await;

        // Millisecond clock, bumped past the newest id on collisions
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let newest = posts.iter().map(|p| p.id).max().unwrap_or(0);
        let id = now.max(newest + 1);

        let post = compose_post(author, author_avatar, account_type, draft, id)?;
        posts.insert(0, post.clone());
        tracing::debug!(id, author, "post published");
        Ok(post)
    }
}
