//! Error types for the Slack call layer.
//!
//! Every failed call is reported as a [`SlackError`]. The variants separate
//! failures of the HTTP exchange itself from errors Slack reports inside a
//! successful response, so callers can branch on the kind instead of
//! matching message text.

use http::HeaderMap;
use thiserror::Error;

/// Result type for Slack operations
pub type SlackResult<T> = Result<T, SlackError>;

/// Root error type for the Slack call layer
#[derive(Error, Debug)]
pub enum SlackError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Slack answered with a non-success HTTP status
    #[error("Slack API call to {method} failed with status code {status}: '{body}'. Headers: {headers:?}")]
    Transport {
        /// API method that was called
        method: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Response headers
        headers: HeaderMap,
    },

    /// The HTTP exchange succeeded but the payload carries an `error` field
    #[error("Slack API call to {method} returned an error: {code}.")]
    Application {
        /// API method that was called
        method: String,
        /// Slack error code, e.g. `invalid_auth`
        code: String,
    },

    /// The response body could not be decoded
    #[error("Slack API call to {method} returned an undecodable response: {message}")]
    Decode {
        /// API method that was called
        method: String,
        /// Decoder error message
        message: String,
    },
}

impl SlackError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "SLACK_CONFIG",
            Self::Network(_) => "SLACK_NETWORK",
            Self::Transport { .. } => "SLACK_TRANSPORT",
            Self::Application { .. } => "SLACK_APPLICATION",
            Self::Decode { .. } => "SLACK_DECODE",
        }
    }

    /// API method the failed call targeted, if the error came from a call
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Transport { method, .. }
            | Self::Application { method, .. }
            | Self::Decode { method, .. } => Some(method),
            Self::Configuration(_) | Self::Network(_) => None,
        }
    }

    /// HTTP status code of a transport failure
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Slack error code of an application failure
    pub fn slack_error_code(&self) -> Option<&str> {
        match self {
            Self::Application { code, .. } => Some(code),
            _ => None,
        }
    }

    pub(crate) fn decode(method: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing token
    #[error("API token is missing")]
    MissingToken,

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Network errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}
