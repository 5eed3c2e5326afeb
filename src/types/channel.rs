//! Channel-related types for the Slack API.

use super::{ChannelId, UserId};
use serde::{Deserialize, Serialize};

/// Direct-message channel between the bot and one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Im {
    /// IM channel ID
    pub id: ChannelId,
    /// The other participant
    #[serde(rename = "user", default)]
    pub user_id: UserId,
}

impl Im {
    /// Create a new IM record
    pub fn new(id: impl Into<ChannelId>, user_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Public channel or private group as reported by `rtm.start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackChannel {
    /// Channel ID
    pub id: ChannelId,
    /// Channel name (without #)
    #[serde(default)]
    pub name: Option<String>,
    /// Creation timestamp (Unix)
    #[serde(default)]
    pub created: Option<i64>,
    /// Channel topic
    #[serde(default)]
    pub topic: Option<ChannelTopic>,
    /// Member user IDs
    #[serde(default)]
    pub members: Vec<UserId>,
}

/// Channel topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTopic {
    /// Topic text
    pub value: String,
    /// User who set the topic
    #[serde(default)]
    pub creator: Option<UserId>,
    /// When the topic was set (Unix)
    #[serde(default)]
    pub last_set: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_im_without_user_defaults() {
        let im: Im = serde_json::from_str(r#"{"id":"D024BFF1M"}"#).unwrap();
        assert_eq!(im.id.as_str(), "D024BFF1M");
        assert_eq!(im.user_id.as_str(), "");
    }

    #[test]
    fn test_channel_deserialize_lenient() {
        let channel: SlackChannel = serde_json::from_str(
            r#"{"id":"C1","name":"general","topic":{"value":"Hi"},"members":["U1","U2"]}"#,
        )
        .unwrap();
        assert_eq!(channel.name.as_deref(), Some("general"));
        assert_eq!(channel.topic.unwrap().value, "Hi");
        assert_eq!(channel.members.len(), 2);
    }
}
