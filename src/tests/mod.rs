//! Tests for the Slack adapter API.


#[cfg(test)]
mod im_mapping_tests;


use crate::api::SlackApi;
use crate::config::{SlackConfig, SlackConfigBuilder};
use crate::mocks::MockHttpTransport;
use std::sync::Arc;

pub(crate) const TOKEN: &str = "abcd-1234567890-hWYd21AmMH2UHAkx29vb5c1Y";

pub(crate) fn test_config() -> SlackConfig {
    SlackConfigBuilder::new().token(TOKEN).build_unchecked()
}

pub(crate) fn api_with(config: SlackConfig, transport: &Arc<MockHttpTransport>) -> SlackApi {
    SlackApi::with_transport(config, transport.clone())
}
