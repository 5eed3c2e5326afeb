//! Slack Adapter API
//!
//! Web API call layer and direct-message channel cache for Slack chat bots:
//! - Form-encoded calls with JSON encoding of structured arguments
//! - Default message arguments merged into posted and updated messages
//! - Typed errors separating transport, application and decode failures
//! - Memoized user → IM channel lookup with per-user request coalescing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slack_adapter::{Arguments, ChannelId, SlackApiTrait, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = slack_adapter::create_api_from_env()?;
//!
//!     api.post_message(
//!         &ChannelId::new("C024BE91L"),
//!         Arguments::new().with("text", "Hello, Slack!"),
//!     )
//!     .await?;
//!
//!     let ims = slack_adapter::ImMapping::new(std::sync::Arc::new(api), Vec::new());
//!     let dm = ims.im_for(&UserId::new("U023BECGF")).await?;
//!     println!("DM channel: {}", dm);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod api;
pub mod arguments;
pub mod config;
pub mod errors;
pub mod im_mapping;
pub mod roster;
pub mod transport;
pub mod types;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use api::{CallResult, SlackApi, SlackApiTrait};
pub use arguments::{ArgValue, Arguments, Scalar};
pub use config::{SlackConfig, SlackConfigBuilder};
pub use errors::{SlackError, SlackResult};
pub use im_mapping::ImMapping;
pub use roster::roster;
pub use types::{Attachment, ChannelId, Im, TeamData, UserId};

/// Default base URL for Slack API
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a Slack API client with the given configuration
pub fn create_api(config: SlackConfig) -> SlackResult<SlackApi> {
    SlackApi::new(config)
}

/// Create a Slack API client from environment variables
///
/// See [`SlackConfig::from_env`] for the variables read.
pub fn create_api_from_env() -> SlackResult<SlackApi> {
    let config = SlackConfig::from_env()?;
    create_api(config)
}
