//! User-related types for the Slack API.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Slack user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackUser {
    /// User ID
    pub id: UserId,
    /// Username
    #[serde(default)]
    pub name: Option<String>,
    /// Real name
    #[serde(default)]
    pub real_name: Option<String>,
    /// Whether deleted/deactivated
    #[serde(default)]
    pub deleted: bool,
    /// Whether bot
    #[serde(default)]
    pub is_bot: bool,
}

impl SlackUser {
    /// Name to show for this user, preferring the real name
    pub fn display_name(&self) -> &str {
        self.real_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.name.as_deref())
            .unwrap_or(self.id.as_str())
    }
}
