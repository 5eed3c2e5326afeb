//! Common types for the Slack API.
//!
//! Identifier newtypes and the domain records decoded from call results.

use serde::{Deserialize, Serialize};

pub mod attachment;
pub mod channel;
pub mod user;

pub use attachment::*;
pub use channel::*;
pub use user::*;

/// Slack channel ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Create a new channel ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a public channel ID (starts with C)
    pub fn is_public_channel(&self) -> bool {
        self.0.starts_with('C')
    }

    /// Check if this is a private channel or multi-party IM ID (starts with G)
    pub fn is_group(&self) -> bool {
        self.0.starts_with('G')
    }

    /// Check if this is a DM channel ID (starts with D)
    pub fn is_dm(&self) -> bool {
        self.0.starts_with('D')
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slack user ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the team returned by `rtm.start`
#[derive(Debug, Clone)]
pub struct TeamData {
    /// Open direct-message channels
    pub ims: Vec<Im>,
    /// The bot user itself
    pub self_user: SlackUser,
    /// All users on the team
    pub users: Vec<SlackUser>,
    /// Public channels followed by private groups
    pub channels: Vec<SlackChannel>,
    /// Real-time messaging WebSocket URL
    pub websocket_url: String,
}
