//! Configuration management for the Slack client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use crate::arguments::{ArgValue, Arguments};
use crate::errors::{ConfigurationError, SlackError, SlackResult};
use crate::observability::redact_token;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Secure wrapper for the Slack API token
#[derive(Clone)]
pub struct SlackToken {
    token: SecretString,
}

impl SlackToken {
    /// Create a new token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.token.expose_secret().is_empty()
    }

    /// Expose the token for use in requests
    pub(crate) fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for SlackToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlackToken({})", redact_token(self.expose()))
    }
}

/// Configuration for the Slack client
#[derive(Clone)]
pub struct SlackConfig {
    /// API token attached to every call
    pub(crate) token: Option<SlackToken>,
    /// Outbound proxy
    pub proxy: Option<Url>,
    /// `parse` mode for posted messages
    pub parse: Option<String>,
    /// Whether posted messages link channel and user names
    pub link_names: Option<bool>,
    /// Whether posted messages unfurl text links
    pub unfurl_links: Option<bool>,
    /// Whether posted messages unfurl media links
    pub unfurl_media: Option<bool>,
    /// Additional default arguments for posted and updated messages
    pub default_message_arguments: Arguments,
    /// Base URL for API requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("token", &self.token)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("parse", &self.parse)
            .field("link_names", &self.link_names)
            .field("unfurl_links", &self.unfurl_links)
            .field("unfurl_media", &self.unfurl_media)
            .field("default_message_arguments", &self.default_message_arguments)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: None,
            proxy: None,
            parse: None,
            link_names: None,
            unfurl_links: None,
            unfurl_media: None,
            default_message_arguments: Arguments::new(),
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SlackConfig {
    /// Create a new configuration builder
    pub fn builder() -> SlackConfigBuilder {
        SlackConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads `SLACK_TOKEN`, `SLACK_PROXY`, `SLACK_PARSE`, `SLACK_LINK_NAMES`,
    /// `SLACK_UNFURL_LINKS`, `SLACK_UNFURL_MEDIA`, `SLACK_BASE_URL` and
    /// `SLACK_TIMEOUT` (seconds).
    pub fn from_env() -> SlackResult<Self> {
        let mut builder = SlackConfigBuilder::new();

        if let Ok(token) = std::env::var("SLACK_TOKEN") {
            builder = builder.token(&token);
        }

        if let Ok(proxy) = std::env::var("SLACK_PROXY") {
            builder = builder.proxy(&proxy)?;
        }

        if let Ok(parse) = std::env::var("SLACK_PARSE") {
            builder = builder.parse(parse);
        }

        if let Some(flag) = env_flag("SLACK_LINK_NAMES") {
            builder = builder.link_names(flag);
        }
        if let Some(flag) = env_flag("SLACK_UNFURL_LINKS") {
            builder = builder.unfurl_links(flag);
        }
        if let Some(flag) = env_flag("SLACK_UNFURL_MEDIA") {
            builder = builder.unfurl_media(flag);
        }

        if let Ok(url) = std::env::var("SLACK_BASE_URL") {
            builder = builder.base_url(&url)?;
        }

        if let Ok(timeout) = std::env::var("SLACK_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// Get the token if configured
    pub fn token(&self) -> Option<&SlackToken> {
        self.token.as_ref()
    }

    /// Build the full URL for an API method
    pub fn build_url(&self, method: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = method.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> SlackResult<()> {
        match &self.token {
            Some(token) if !token.is_empty() => Ok(()),
            _ => Err(SlackError::Configuration(ConfigurationError::MissingToken)),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    match std::env::var(name).ok()?.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Builder for SlackConfig
#[derive(Default)]
pub struct SlackConfigBuilder {
    config: SlackConfig,
}

impl SlackConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: SlackConfig::default(),
        }
    }

    /// Set the API token
    pub fn token(mut self, token: &str) -> Self {
        self.config.token = Some(SlackToken::new(token));
        self
    }

    /// Route requests through a proxy
    pub fn proxy(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.proxy = Some(parse_url(url, "proxy")?);
        Ok(self)
    }

    /// Set the `parse` mode for posted messages
    pub fn parse(mut self, parse: impl Into<String>) -> Self {
        self.config.parse = Some(parse.into());
        self
    }

    /// Set whether posted messages link names
    pub fn link_names(mut self, link_names: bool) -> Self {
        self.config.link_names = Some(link_names);
        self
    }

    /// Set whether posted messages unfurl links
    pub fn unfurl_links(mut self, unfurl: bool) -> Self {
        self.config.unfurl_links = Some(unfurl);
        self
    }

    /// Set whether posted messages unfurl media
    pub fn unfurl_media(mut self, unfurl: bool) -> Self {
        self.config.unfurl_media = Some(unfurl);
        self
    }

    /// Add one default message argument
    pub fn default_message_argument(
        mut self,
        key: impl Into<String>,
        value: impl Into<ArgValue>,
    ) -> Self {
        self.config.default_message_arguments.insert(key, value);
        self
    }

    /// Replace the default message arguments
    pub fn default_message_arguments(mut self, arguments: Arguments) -> Self {
        self.config.default_message_arguments = arguments;
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.base_url = parse_url(url, "base URL")?.to_string();
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SlackResult<SlackConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> SlackConfig {
        self.config
    }
}

fn parse_url(url: &str, what: &str) -> Result<Url, ConfigurationError> {
    Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
        message: format!("Invalid {}: {}", what, e),
    })
}
