//! User directory
//!
//! Profiles known to the app and the follow-based views over them used by
//! the "Following" list and provider suggestions.

use serde::{Deserialize, Serialize};

use app_state::follow::{AccountType, FollowSet};

/// Basic profile information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Profile identifier
    pub id: u64,
    /// Display name (also the follow key)
    pub name: String,
    /// Avatar glyph
    #[serde(default)]
    pub avatar: String,
    /// Home location
    pub location: String,
    /// Declared account type
    pub account_type: AccountType,
}

/// Profiles the viewer follows, in directory order
pub fn followed_profiles<'a>(
    directory: &'a [UserSummary],
    following: &FollowSet,
) -> Vec<&'a UserSummary> {
    directory
        .iter()
        .filter(|user| following.contains(&user.name))
        .collect()
}

/// Providers the viewer could follow, in directory order
///
/// Excludes profiles already followed and the viewer's own profile.
pub fn suggested_providers<'a>(
    directory: &'a [UserSummary],
    following: &FollowSet,
    viewer_name: Option<&str>,
) -> Vec<&'a UserSummary> {
    directory
        .iter()
        .filter(|user| user.account_type == AccountType::Provide)
        .filter(|user| !following.contains(&user.name))
        .filter(|user| viewer_name != Some(user.name.as_str()))
        .collect()
}
