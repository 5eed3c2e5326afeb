//! Legacy message attachments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message attachment (legacy)
///
/// Built from its main text plus optional decorations. The wire form is
/// produced by [`Attachment::to_value`]: the set options first, then
/// `fallback` (defaulting to the text) and `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Main text
    pub text: String,
    /// Plain-text summary for clients that cannot render attachments
    #[serde(default)]
    pub fallback: Option<String>,
    /// Decorations
    #[serde(flatten)]
    pub options: AttachmentOptions,
}

/// Optional attachment decorations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentOptions {
    /// Color bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Pretext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Author link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    /// Author icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    /// Fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Thumb URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    /// Footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Footer icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    /// Timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    /// Fields rendered as mrkdwn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

/// Attachment field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    /// Field title
    pub title: String,
    /// Field value
    pub value: String,
    /// Whether short (side-by-side)
    #[serde(default)]
    pub short: bool,
}

impl Attachment {
    /// Create an attachment with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the fallback text
    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Set the color bar
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.options.color = Some(color.into());
        self
    }

    /// Set the pretext
    pub fn pretext(mut self, pretext: impl Into<String>) -> Self {
        self.options.pretext = Some(pretext.into());
        self
    }

    /// Set the title, optionally linked
    pub fn title(mut self, title: impl Into<String>, link: Option<String>) -> Self {
        self.options.title = Some(title.into());
        self.options.title_link = link;
        self
    }

    /// Set the author name
    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.options.author_name = Some(name.into());
        self
    }

    /// Set the image URL
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.options.image_url = Some(url.into());
        self
    }

    /// Set the thumbnail URL
    pub fn thumb_url(mut self, url: impl Into<String>) -> Self {
        self.options.thumb_url = Some(url.into());
        self
    }

    /// Set the footer
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.options.footer = Some(footer.into());
        self
    }

    /// Append a field
    pub fn field(mut self, title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        self.options.fields.push(AttachmentField {
            title: title.into(),
            value: value.into(),
            short,
        });
        self
    }

    /// Mark attachment parts as mrkdwn
    pub fn mrkdwn_in(mut self, parts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.mrkdwn_in = parts.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical keyed form sent to Slack
    pub fn to_value(&self) -> Value {
        let mut map = match serde_json::to_value(&self.options) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let fallback = self.fallback.as_ref().unwrap_or(&self.text);
        map.insert("fallback".to_string(), Value::String(fallback.clone()));
        map.insert("text".to_string(), Value::String(self.text.clone()));
        Value::Object(map)
    }
}
