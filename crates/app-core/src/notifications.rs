//! Notification inbox
//!
//! Activity notifications (new posts, likes, comments, follows, messages and
//! system notices) with read tracking. The inbox is in-memory only.

use serde::{Deserialize, Serialize};

/// Types of notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A followed provider posted
    Post,
    /// Someone liked your post
    Like,
    /// Someone commented on your post
    Comment,
    /// Someone followed you
    Follow,
    /// Someone sent you a message
    Message,
    /// App announcement
    System,
}

impl NotificationKind {
    /// Icon name shown next to the notification
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Post => "article",
            NotificationKind::Like => "favorite",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "person-add",
            NotificationKind::Message => "message",
            NotificationKind::System => "info",
        }
    }

    /// Accent color of the icon
    pub fn accent_color(&self) -> &'static str {
        match self {
            NotificationKind::Post => "#007AFF",
            NotificationKind::Like => "#FF3B30",
            NotificationKind::Comment => "#34C759",
            NotificationKind::Follow => "#5856D6",
            NotificationKind::Message => "#FF9500",
            NotificationKind::System => "#8E8E93",
        }
    }
}

/// A notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier
    pub id: u64,

    /// Kind of activity
    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// Headline
    pub title: String,

    /// Body text
    pub message: String,

    /// Relative timestamp label
    pub time_ago: String,

    /// Whether the viewer has seen it
    #[serde(default)]
    pub is_read: bool,

    /// Avatar glyph of the acting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Display name of the acting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// In-memory notification list with read tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
}

impl NotificationInbox {
    /// Create an inbox holding `notifications`, newest first
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    /// All notifications, newest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Look up a notification by id
    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Number of unread notifications
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Whether anything is unread
    pub fn has_unread(&self) -> bool {
        self.notifications.iter().any(|n| !n.is_read)
    }

    /// Mark one notification read
    ///
    /// Returns false when no notification has that id. Marking an already
    /// read notification is a no-op.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification read
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }
}
