//! DonateSome application core
//!
//! [`AppContext`] is the composition root: it opens preference storage,
//! creates the one [`ThemeStore`] and the one [`FollowGraphStore`] of the
//! session, and hands out handles to them. Screens receive an `AppContext`
//! (or the individual handles) instead of reaching for globals.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;

use app_core::fixtures::{self, SEED_FOLLOWING};
use app_core::{
    feed_for_snapshot, followed_profiles, search, search_index, LocalFeed, NotificationInbox,
    Post, PostDraft, PostError, RecentSearches, SearchResult, UserSummary,
};
use app_platform::AppearanceSource;
use app_state::{AccountType, FollowGraphStore, ThemeStore, ThemeStoreConfig};
use storage::{open_preference_storage, KvConfig, MemoryStorage, PreferenceStorage};
use tokio::sync::RwLock;

pub use app_core;
pub use app_platform;
pub use app_state;
pub use app_ui;
pub use storage;

/// Where the theme preference is persisted
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// sled database, falling back to memory if it cannot be opened
    Durable(KvConfig),
    /// Process memory only
    Memory,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Preference storage backend
    pub storage: StorageBackend,
    /// Theme store settings
    pub theme: ThemeStoreConfig,
    /// Viewer's display name
    pub viewer_name: Option<String>,
    /// Viewer's account type
    pub account_type: AccountType,
    /// Names followed at startup
    pub seed_following: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Durable(KvConfig::default()),
            theme: ThemeStoreConfig::default(),
            viewer_name: None,
            account_type: AccountType::default(),
            seed_following: SEED_FOLLOWING.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Keep preferences in memory only
    pub fn in_memory(mut self) -> Self {
        self.storage = StorageBackend::Memory;
        self
    }

    /// Persist preferences in a sled database
    pub fn kv(mut self, config: KvConfig) -> Self {
        self.storage = StorageBackend::Durable(config);
        self
    }

    /// Set theme store settings
    pub fn theme(mut self, config: ThemeStoreConfig) -> Self {
        self.theme = config;
        self
    }

    /// Set the viewer's display name
    pub fn viewer_name(mut self, name: impl Into<String>) -> Self {
        self.viewer_name = Some(name.into());
        self
    }

    /// Set the viewer's account type
    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    /// Replace the startup follow set
    pub fn seed_following<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_following = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Home feed as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFeed {
    /// Visible posts, in feed order
    pub posts: Vec<Post>,
    /// Message to show instead of posts, when nothing is visible
    pub empty_message: Option<&'static str>,
}

/// Shared application services for one session
///
/// Cloning yields another handle to the same services.
#[derive(Clone)]
pub struct AppContext {
    theme: ThemeStore,
    follows: FollowGraphStore,
    feed: LocalFeed,
    notifications: Arc<RwLock<NotificationInbox>>,
    directory: Arc<Vec<UserSummary>>,
    search_index: Arc<Vec<SearchResult>>,
    recent_searches: Arc<RwLock<RecentSearches>>,
}

impl AppContext {
    /// Start a session, opening the configured preference storage
    pub async fn start(
        config: AppConfig,
        appearance: Arc<dyn AppearanceSource>,
    ) -> anyhow::Result<Self> {
        let storage: Arc<dyn PreferenceStorage> = match &config.storage {
            StorageBackend::Durable(kv) => open_preference_storage(kv.clone()),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage, appearance).await
    }

    /// Start a session on an already opened storage backend
    pub async fn with_storage(
        config: AppConfig,
        storage: Arc<dyn PreferenceStorage>,
        appearance: Arc<dyn AppearanceSource>,
    ) -> anyhow::Result<Self> {
        let theme = ThemeStore::initialize(storage, appearance, config.theme.clone()).await;

        let follows = FollowGraphStore::new();
        if let Some(name) = &config.viewer_name {
            follows.set_viewer_name(name.clone());
        }
        follows.set_account_type(config.account_type);
        follows.initialize_follow_set(config.seed_following.iter().cloned());

        let feed = LocalFeed::new(fixtures::sample_posts()?);
        let notifications = NotificationInbox::new(fixtures::sample_notifications()?);
        let directory = fixtures::sample_directory()?;
        let search_index = search_index(&directory, fixtures::sample_search_topics()?);

        tracing::info!(
            account_type = %config.account_type,
            following = follows.following().len(),
            "session started"
        );

        Ok(Self {
            theme,
            follows,
            feed,
            notifications: Arc::new(RwLock::new(notifications)),
            directory: Arc::new(directory),
            search_index: Arc::new(search_index),
            recent_searches: Arc::new(RwLock::new(RecentSearches::new())),
        })
    }

    /// Theme preference store
    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    /// Follow graph store
    pub fn follows(&self) -> &FollowGraphStore {
        &self.follows
    }

    /// Session feed
    pub fn feed(&self) -> &LocalFeed {
        &self.feed
    }

    /// Known profiles
    pub fn directory(&self) -> &[UserSummary] {
        &self.directory
    }

    /// Home feed for the current follow set and account type
    pub async fn home_feed(&self) -> HomeFeed {
        let posts = self.feed.posts().await;
        let snapshot = self.follows.snapshot();
        let view = feed_for_snapshot(&posts, &snapshot);

        HomeFeed {
            posts: view.posts().iter().map(|post| (*post).clone()).collect(),
            empty_message: view.empty_message(),
        }
    }

    /// Profiles the viewer follows, for the "Following" list
    pub fn following_profiles(&self) -> Vec<UserSummary> {
        let following = self.follows.following();
        followed_profiles(&self.directory, &following)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Publish a post as the viewer
    pub async fn publish_post(&self, draft: PostDraft) -> Result<Post, PostError> {
        let snapshot = self.follows.snapshot();
        let author = snapshot.viewer_name.as_deref().unwrap_or("You");
        let avatar = self
            .directory
            .iter()
            .find(|user| user.name == author)
            .map(|user| user.avatar.as_str())
            .unwrap_or_default();

        self.feed.publish(author, avatar, snapshot.account_type, draft).await
    }

    /// Copy of the notification inbox
    pub async fn notifications(&self) -> NotificationInbox {
        self.notifications.read().await.clone()
    }

    /// Mark one notification read, returning whether it exists
    pub async fn mark_notification_read(&self, id: u64) -> bool {
        self.notifications.write().await.mark_read(id)
    }

    /// Mark every notification read
    pub async fn mark_all_notifications_read(&self) {
        self.notifications.write().await.mark_all_read();
    }

    /// People, posts and locations matching `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(&self.search_index, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Remember a submitted query, returning whether it was added
    pub async fn submit_search(&self, query: &str) -> bool {
        self.recent_searches.write().await.record(query)
    }

    /// Recent queries, newest first
    pub async fn recent_searches(&self) -> Vec<String> {
        self.recent_searches.read().await.queries().to_vec()
    }

    /// Forget all recent queries
    pub async fn clear_recent_searches(&self) {
        self.recent_searches.write().await.clear();
    }

    /// Finish pending preference writes and release storage
    pub async fn shutdown(&self) {
        self.theme.shutdown().await;
        tracing::info!("session stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_platform::{ColorScheme, ManualAppearance};

    async fn context(config: AppConfig) -> AppContext {
        let appearance = Arc::new(ManualAppearance::new(ColorScheme::Light));
        AppContext::start(config.in_memory(), appearance).await.unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert!(matches!(config.storage, StorageBackend::Durable(_)));
        assert_eq!(config.account_type, AccountType::Want);
        assert_eq!(config.seed_following.len(), 3);
        assert_eq!(config.viewer_name, None);
    }

    #[tokio::test]
    async fn test_seeded_want_viewer_sees_followed_posts() {
        let ctx = context(AppConfig::default()).await;

        let feed = ctx.home_feed().await;
        let authors: Vec<_> = feed.posts.iter().map(|p| p.author_display_name.as_str()).collect();
        assert_eq!(authors, vec!["Sarah Johnson", "Michael Chen", "Emily Rodriguez"]);
        assert_eq!(feed.empty_message, None);
    }

    #[tokio::test]
    async fn test_provider_sees_whole_feed() {
        let ctx = context(AppConfig::default().account_type(AccountType::Provide)).await;
        assert_eq!(ctx.home_feed().await.posts.len(), 6);
    }

    #[tokio::test]
    async fn test_empty_follow_set_has_message() {
        let ctx = context(AppConfig::default().seed_following(Vec::<String>::new())).await;

        let feed = ctx.home_feed().await;
        assert!(feed.posts.is_empty());
        assert!(feed.empty_message.is_some());
    }

    #[tokio::test]
    async fn test_following_profiles_track_store() {
        let ctx = context(AppConfig::default()).await;
        assert_eq!(ctx.following_profiles().len(), 3);

        ctx.follows().unfollow("Michael Chen");
        let names: Vec<_> = ctx.following_profiles().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Sarah Johnson", "Emily Rodriguez"]);
    }

    #[tokio::test]
    async fn test_provider_post_shows_first() {
        let ctx = context(
            AppConfig::default()
                .viewer_name("Robert Taylor")
                .account_type(AccountType::Provide),
        )
        .await;

        let post = ctx
            .publish_post(PostDraft::new("Soup for 10", "Boston, MA"))
            .await
            .unwrap();
        assert_eq!(post.author_display_name, "Robert Taylor");
        assert_eq!(post.author_avatar, "👨‍🔧");

        let feed = ctx.home_feed().await;
        assert_eq!(feed.posts[0], post);
        assert_eq!(feed.posts.len(), 7);
    }

    #[tokio::test]
    async fn test_want_viewer_cannot_post() {
        let ctx = context(AppConfig::default()).await;
        let result = ctx.publish_post(PostDraft::new("Soup", "Boston, MA")).await;
        assert_eq!(result, Err(PostError::NotAProvider));
    }

    #[tokio::test]
    async fn test_notifications() {
        let ctx = context(AppConfig::default()).await;
        assert_eq!(ctx.notifications().await.unread_count(), 6);

        assert!(ctx.mark_notification_read(1).await);
        assert_eq!(ctx.notifications().await.unread_count(), 5);

        ctx.mark_all_notifications_read().await;
        assert_eq!(ctx.notifications().await.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_search_and_recent_searches() {
        let ctx = context(AppConfig::default()).await;

        let titles: Vec<_> = ctx.search("los angeles").into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Michael Chen", "Los Angeles, CA"]);
        assert!(ctx.search("").is_empty());

        assert!(ctx.submit_search(" bread ").await);
        assert!(!ctx.submit_search("bread").await);
        assert!(ctx.submit_search("apples").await);
        assert_eq!(ctx.recent_searches().await, vec!["apples", "bread"]);

        ctx.clear_recent_searches().await;
        assert!(ctx.recent_searches().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_stores() {
        let ctx = context(AppConfig::default()).await;
        let other = ctx.clone();

        other.follows().follow("David Kim");
        other.theme().set_preference(app_ui::ThemePreference::Dark);

        assert!(ctx.follows().is_following("David Kim"));
        assert!(ctx.theme().resolved_theme().is_dark);
    }
}
