//! Slack Web API call layer.
//!
//! [`SlackApi`] turns a method name and [`Arguments`] into one form-encoded
//! POST, then classifies the outcome: a non-2xx status is a
//! [`SlackError::Transport`], a body that is not a JSON object is a
//! [`SlackError::Decode`], and a payload with a truthy `error` field is a
//! [`SlackError::Application`]. Nothing is retried.
//!
//! Message posting and updating start from the default message arguments
//! derived from [`SlackConfig`] once, when the client is built.

use crate::arguments::Arguments;
use crate::config::SlackConfig;
use crate::errors::{ConfigurationError, SlackError, SlackResult};
use crate::observability::redact_form_fields;
use crate::transport::{FormRequest, HttpTransport, RawResponse, ReqwestTransport};
use crate::types::{ChannelId, Im, SlackChannel, SlackUser, TeamData, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Decoded response object of a successful call
pub type CallResult = Map<String, Value>;

/// Operations of the Slack Web API
///
/// Implementors provide [`call_api`](SlackApiTrait::call_api) and the default
/// message arguments; every named operation is expressed through them.
#[async_trait]
pub trait SlackApiTrait: Send + Sync {
    /// Invoke an API method
    async fn call_api(&self, method: &str, arguments: Arguments) -> SlackResult<CallResult>;

    /// Defaults applied to `chat.postMessage` and `chat.update`
    fn default_message_arguments(&self) -> &Arguments;

    /// Open (or reuse) the direct-message channel with a user
    async fn im_open(&self, user_id: &UserId) -> SlackResult<Im> {
        let response = self
            .call_api("im.open", Arguments::new().with("user", user_id))
            .await?;

        let channel_id = response
            .get("channel")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| SlackError::decode("im.open", "response has no channel.id"))?;

        Ok(Im::new(channel_id, user_id.clone()))
    }

    /// Get information about a public channel
    async fn channels_info(&self, channel: &ChannelId) -> SlackResult<CallResult> {
        self.call_api("channels.info", Arguments::new().with("channel", channel))
            .await
    }

    /// List public channels
    async fn channels_list(&self) -> SlackResult<CallResult> {
        self.call_api("channels.list", Arguments::new()).await
    }

    /// List private groups
    async fn groups_list(&self) -> SlackResult<CallResult> {
        self.call_api("groups.list", Arguments::new()).await
    }

    /// List multi-party IMs
    async fn mpim_list(&self) -> SlackResult<CallResult> {
        self.call_api("mpim.list", Arguments::new()).await
    }

    /// List direct-message channels
    async fn im_list(&self) -> SlackResult<CallResult> {
        self.call_api("im.list", Arguments::new()).await
    }

    /// Post a message via `chat.postMessage`
    ///
    /// `arguments` override the default message arguments. Callers supply
    /// `text` and/or `attachments`.
    async fn post_message(
        &self,
        channel: &ChannelId,
        arguments: Arguments,
    ) -> SlackResult<CallResult> {
        let explicit = arguments.with("channel", channel);
        let merged = Arguments::merged(self.default_message_arguments(), &explicit);
        self.call_api("chat.postMessage", merged).await
    }

    /// Post a `/me` style message
    async fn me_message(
        &self,
        channel: &ChannelId,
        text: &str,
        arguments: Arguments,
    ) -> SlackResult<CallResult> {
        let arguments = arguments.with("channel", channel).with("text", text);
        self.call_api("chat.meMessage", arguments).await
    }

    /// Update a previously posted message
    async fn chat_update(
        &self,
        channel: &ChannelId,
        ts: &str,
        arguments: Arguments,
    ) -> SlackResult<CallResult> {
        let explicit = arguments.with("channel", channel).with("ts", ts);
        let merged = Arguments::merged(self.default_message_arguments(), &explicit);
        self.call_api("chat.update", merged).await
    }

    /// Delete a message
    ///
    /// Of the default message arguments only `as_user` is forwarded, and only
    /// when the caller did not pass one.
    async fn chat_delete(
        &self,
        channel: &ChannelId,
        ts: &str,
        mut arguments: Arguments,
    ) -> SlackResult<CallResult> {
        if !arguments.contains_key("as_user") {
            if let Some(as_user) = self.default_message_arguments().get("as_user") {
                arguments.insert("as_user", as_user.clone());
            }
        }

        let arguments = arguments.with("channel", channel).with("ts", ts);
        self.call_api("chat.delete", arguments).await
    }

    /// Set a channel's topic
    async fn set_topic(&self, channel: &ChannelId, topic: &str) -> SlackResult<CallResult> {
        self.call_api(
            "channels.setTopic",
            Arguments::new().with("channel", channel).with("topic", topic),
        )
        .await
    }

    /// Start a real-time messaging session and snapshot the team
    async fn rtm_start(&self) -> SlackResult<TeamData> {
        let response = self.call_api("rtm.start", Arguments::new()).await?;

        let data: RtmStartResponse = serde_json::from_value(Value::Object(response))
            .map_err(|e| SlackError::decode("rtm.start", e.to_string()))?;

        let mut channels = data.channels;
        channels.extend(data.groups);

        Ok(TeamData {
            ims: data.ims,
            self_user: data.self_user,
            users: data.users,
            channels,
            websocket_url: data.url,
        })
    }

    /// Post each text as its own message, in order
    async fn send_messages(
        &self,
        channel: &ChannelId,
        texts: &[String],
    ) -> SlackResult<Vec<CallResult>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let result = self
                .post_message(channel, Arguments::new().with("text", text))
                .await?;
            results.push(result);
        }
        Ok(results)
    }
}

#[derive(Deserialize)]
struct RtmStartResponse {
    #[serde(default)]
    ims: Vec<Im>,
    #[serde(rename = "self")]
    self_user: SlackUser,
    #[serde(default)]
    users: Vec<SlackUser>,
    #[serde(default)]
    channels: Vec<SlackChannel>,
    #[serde(default)]
    groups: Vec<SlackChannel>,
    url: String,
}

/// Slack Web API client
#[derive(Clone)]
pub struct SlackApi {
    config: Arc<SlackConfig>,
    transport: Arc<dyn HttpTransport>,
    default_message_arguments: Arc<Arguments>,
}

impl SlackApi {
    /// Create a client using the reqwest transport
    pub fn new(config: SlackConfig) -> SlackResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::with_proxy(config.timeout, config.proxy.as_ref())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: SlackConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let default_message_arguments = Arc::new(build_default_message_arguments(&config));
        Self {
            config: Arc::new(config),
            transport,
            default_message_arguments,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Invoke an API method
    ///
    /// Null arguments are dropped, structured ones are sent as JSON text, and
    /// the configured token replaces any `token` argument. A client without a
    /// token refuses to send anything.
    #[instrument(skip_all, fields(method = %method))]
    pub async fn call_api(&self, method: &str, mut arguments: Arguments) -> SlackResult<CallResult> {
        let token = match self.config.token() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ConfigurationError::MissingToken.into()),
        };
        arguments.remove("token");

        let mut fields = Vec::with_capacity(arguments.len() + 1);
        fields.push(("token".to_string(), token.expose().to_string()));
        fields.extend(arguments.to_form_fields());

        debug!(fields = ?redact_form_fields(&fields), "Calling Slack API");

        let request = FormRequest::post(self.config.build_url(method)).fields(fields);
        let response = self.transport.send_form(request).await?;

        parse_response(method, response)
    }
}

#[async_trait]
impl SlackApiTrait for SlackApi {
    async fn call_api(&self, method: &str, arguments: Arguments) -> SlackResult<CallResult> {
        SlackApi::call_api(self, method, arguments).await
    }

    fn default_message_arguments(&self) -> &Arguments {
        &self.default_message_arguments
    }
}

impl std::fmt::Debug for SlackApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackApi")
            .field("config", &self.config)
            .field("default_message_arguments", &self.default_message_arguments)
            .finish()
    }
}

/// Defaults for posted messages: the named options that are configured,
/// overlaid by the caller-supplied defaults.
fn build_default_message_arguments(config: &SlackConfig) -> Arguments {
    let mut named = Arguments::new();

    if let Some(parse) = &config.parse {
        named.insert("parse", parse.as_str());
    }
    if config.link_names == Some(true) {
        named.insert("link_names", 1);
    }
    if let Some(unfurl) = config.unfurl_links {
        named.insert("unfurl_links", unfurl);
    }
    if let Some(unfurl) = config.unfurl_media {
        named.insert("unfurl_media", unfurl);
    }

    Arguments::merged(&named, &config.default_message_arguments)
}

fn parse_response(method: &str, response: RawResponse) -> SlackResult<CallResult> {
    if !response.is_success() {
        return Err(SlackError::Transport {
            method: method.to_string(),
            status: response.status,
            body: response.body,
            headers: response.headers,
        });
    }

    let data: Value = serde_json::from_str(&response.body)
        .map_err(|e| SlackError::decode(method, e.to_string()))?;

    let Value::Object(data) = data else {
        return Err(SlackError::decode(method, "expected a JSON object"));
    };

    if let Some(code) = error_code(&data) {
        warn!(method, error = %code, "Slack API returned an error");
        return Err(SlackError::Application {
            method: method.to_string(),
            code,
        });
    }

    Ok(data)
}

/// The `error` field, if it is set to anything other than null, false or ""
fn error_code(data: &CallResult) -> Option<String> {
    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(code) if code.is_empty() => None,
        Value::String(code) => Some(code.clone()),
        other => Some(other.to_string()),
    }
}
