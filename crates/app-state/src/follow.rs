//! Follow graph and viewer account type
//!
//! This module tracks which authors the current viewer follows and whether the
//! viewer wants food or provides it. Screens share one [`FollowGraphStore`]
//! handle; a follow from the search screen is visible on the home feed and the
//! following list without any extra wiring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Declared role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Looking for food; sees posts from followed providers only
    #[default]
    Want,
    /// Provides food; sees the whole feed and may author posts
    Provide,
}

impl AccountType {
    /// Whether accounts of this type may author posts
    pub fn can_author_posts(&self) -> bool {
        matches!(self, AccountType::Provide)
    }

    /// Badge label shown on profiles
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Want => "I Want Food",
            AccountType::Provide => "I Provide Food",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Want => write!(f, "want"),
            AccountType::Provide => write!(f, "provide"),
        }
    }
}

/// Set of followed display names
///
/// A name appears at most once. Names are compared exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FollowSet(BTreeSet<String>);

impl FollowSet {
    /// Create an empty follow set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is followed
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of followed names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is followed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate followed names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, name: &str) -> bool {
        self.0.insert(name.to_string())
    }

    fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }
}

impl<S: Into<String>> FromIterator<S> for FollowSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|name| is_valid_target(name))
                .collect(),
        )
    }
}

/// Point-in-time view of the follow graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowSnapshot {
    /// Viewer's account type
    pub account_type: AccountType,
    /// Names the viewer follows
    pub following: FollowSet,
    /// Viewer's own display name, once known
    pub viewer_name: Option<String>,
}

fn is_valid_target(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Shared follow graph for the current viewer
///
/// Cloning yields another handle to the same store. Mutations apply
/// synchronously and notify subscribers only when something changed.
/// The store is meant to be mutated from a single event-processing task;
/// reads are safe from anywhere.
///
/// # Example
///
/// ```rust
/// use app_state::follow::{AccountType, FollowGraphStore};
///
/// let store = FollowGraphStore::new();
/// store.initialize_follow_set(["Sarah Johnson"]);
///
/// store.follow("Michael Chen");
/// store.follow("Michael Chen");
/// assert_eq!(store.following().len(), 2);
///
/// store.unfollow("Sarah Johnson");
/// assert!(!store.is_following("Sarah Johnson"));
/// assert_eq!(store.account_type(), AccountType::Want);
/// ```
#[derive(Clone)]
pub struct FollowGraphStore {
    state: Arc<watch::Sender<FollowSnapshot>>,
}

impl FollowGraphStore {
    /// Create a store for a `Want` viewer following nobody
    pub fn new() -> Self {
        let (state, _) = watch::channel(FollowSnapshot::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Replace the follow set wholesale
    ///
    /// Only meant for startup seeding; afterwards use [`follow`](Self::follow)
    /// and [`unfollow`](Self::unfollow).
    pub fn initialize_follow_set<I, S>(&self, seed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut following: FollowSet = seed.into_iter().collect();
        self.state.send_modify(|state| {
            if let Some(viewer) = state.viewer_name.as_deref() {
                following.remove(viewer);
            }
            tracing::debug!(count = following.len(), "follow set initialized");
            state.following = following;
        });
    }

    /// Follow `name`
    ///
    /// Following an already-followed name, an empty name or the viewer's own
    /// name is a no-op. Returns whether the set changed.
    pub fn follow(&self, name: &str) -> bool {
        if !is_valid_target(name) {
            tracing::debug!("ignoring follow of empty name");
            return false;
        }

        self.state.send_if_modified(|state| {
            if state.viewer_name.as_deref() == Some(name) {
                tracing::debug!(name, "ignoring self-follow");
                return false;
            }
            let added = state.following.insert(name);
            if added {
                tracing::debug!(name, "followed");
            }
            added
        })
    }

    /// Unfollow `name`
    ///
    /// Unfollowing a name that is not followed is a no-op. Returns whether
    /// the set changed.
    pub fn unfollow(&self, name: &str) -> bool {
        self.state.send_if_modified(|state| {
            let removed = state.following.remove(name);
            if removed {
                tracing::debug!(name, "unfollowed");
            }
            removed
        })
    }

    /// Whether the viewer follows `name`
    pub fn is_following(&self, name: &str) -> bool {
        self.state.borrow().following.contains(name)
    }

    /// Copy of the current follow set
    pub fn following(&self) -> FollowSet {
        self.state.borrow().following.clone()
    }

    /// Set the viewer's account type
    pub fn set_account_type(&self, account_type: AccountType) {
        self.state.send_if_modified(|state| {
            if state.account_type == account_type {
                return false;
            }
            tracing::debug!(%account_type, "account type changed");
            state.account_type = account_type;
            true
        });
    }

    /// Viewer's account type
    pub fn account_type(&self) -> AccountType {
        self.state.borrow().account_type
    }

    /// Record the viewer's own display name
    ///
    /// The name can no longer be followed and is dropped from the follow set
    /// if it was seeded there.
    pub fn set_viewer_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|state| {
            state.following.remove(&name);
            state.viewer_name = Some(name);
        });
    }

    /// Viewer's own display name, if set
    pub fn viewer_name(&self) -> Option<String> {
        self.state.borrow().viewer_name.clone()
    }

    /// Copy of the whole follow graph state
    pub fn snapshot(&self) -> FollowSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever the follow set or account type changes
    pub fn subscribe(&self) -> watch::Receiver<FollowSnapshot> {
        self.state.subscribe()
    }
}

impl Default for FollowGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FollowGraphStore {
        let store = FollowGraphStore::new();
        store.initialize_follow_set(["Sarah Johnson", "Michael Chen", "Emily Rodriguez"]);
        store
    }

    #[test]
    fn test_defaults() {
        let store = FollowGraphStore::new();
        assert_eq!(store.account_type(), AccountType::Want);
        assert!(store.following().is_empty());
        assert_eq!(store.viewer_name(), None);
    }

    #[test]
    fn test_initialize_follow_set() {
        let store = seeded();
        assert_eq!(store.following().len(), 3);
        assert!(store.is_following("Sarah Johnson"));
        assert!(!store.is_following("David Kim"));

        store.initialize_follow_set(["David Kim"]);
        assert_eq!(store.following().iter().collect::<Vec<_>>(), vec!["David Kim"]);
    }

    #[test]
    fn test_seed_drops_duplicates_and_empty_names() {
        let store = FollowGraphStore::new();
        store.initialize_follow_set(["Sarah Johnson", "Sarah Johnson", "", "  "]);
        assert_eq!(store.following().len(), 1);
    }

    #[test]
    fn test_follow_is_idempotent() {
        let store = seeded();

        assert!(store.follow("David Kim"));
        let once = store.following();

        assert!(!store.follow("David Kim"));
        assert_eq!(store.following(), once);
    }

    #[test]
    fn test_unfollow_is_idempotent() {
        let store = seeded();

        assert!(store.unfollow("Michael Chen"));
        let once = store.following();

        assert!(!store.unfollow("Michael Chen"));
        assert_eq!(store.following(), once);
    }

    #[test]
    fn test_follow_then_unfollow_restores_set() {
        let store = seeded();
        let before = store.following();

        store.follow("Jessica Martinez");
        store.unfollow("Jessica Martinez");

        assert_eq!(store.following(), before);
    }

    #[test]
    fn test_is_following_matches_set() {
        let store = seeded();
        store.follow("Robert Taylor");
        store.unfollow("Emily Rodriguez");

        let set = store.following();
        for name in ["Sarah Johnson", "Michael Chen", "Emily Rodriguez", "Robert Taylor"] {
            assert_eq!(store.is_following(name), set.contains(name), "{name}");
        }
    }

    #[test]
    fn test_empty_names_are_no_ops() {
        let store = seeded();
        let before = store.following();

        assert!(!store.follow(""));
        assert!(!store.follow("   "));
        assert!(!store.unfollow(""));

        assert_eq!(store.following(), before);
    }

    #[test]
    fn test_self_follow_rejected() {
        let store = seeded();
        store.set_viewer_name("Alex Thompson");

        assert!(!store.follow("Alex Thompson"));
        assert!(!store.is_following("Alex Thompson"));
    }

    #[test]
    fn test_viewer_name_removed_from_seed() {
        let store = FollowGraphStore::new();
        store.set_viewer_name("Sarah Johnson");
        store.initialize_follow_set(["Sarah Johnson", "Michael Chen"]);
        assert!(!store.is_following("Sarah Johnson"));

        let store = seeded();
        store.set_viewer_name("Michael Chen");
        assert!(!store.is_following("Michael Chen"));
        assert_eq!(store.viewer_name(), Some("Michael Chen".to_string()));
    }

    #[test]
    fn test_account_type() {
        let store = FollowGraphStore::new();
        store.set_account_type(AccountType::Provide);
        assert_eq!(store.account_type(), AccountType::Provide);
        assert!(store.account_type().can_author_posts());
        assert!(!AccountType::Want.can_author_posts());
    }

    #[test]
    fn test_handles_share_state() {
        let home = seeded();
        let search = home.clone();

        search.follow("David Kim");
        assert!(home.is_following("David Kim"));
    }

    #[tokio::test]
    async fn test_subscribers_notified_on_change_only() {
        let store = seeded();
        let mut rx = store.subscribe();

        store.follow("Sarah Johnson");
        assert!(!rx.has_changed().unwrap());

        store.follow("David Kim");
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().following.contains("David Kim"));

        store.set_account_type(AccountType::Want);
        assert!(!rx.has_changed().unwrap());

        store.set_account_type(AccountType::Provide);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().account_type, AccountType::Provide);
    }

    #[test]
    fn test_account_type_labels() {
        assert_eq!(AccountType::Want.label(), "I Want Food");
        assert_eq!(AccountType::Provide.label(), "I Provide Food");
        assert_eq!(AccountType::Provide.to_string(), "provide");
    }

    #[test]
    fn test_snapshot_serialization() {
        let store = seeded();
        store.set_account_type(AccountType::Provide);

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["accountType"], "provide");
        assert_eq!(json["following"].as_array().unwrap().len(), 3);
    }
}
