//! IM mapping tests.

use super::{api_with, test_config};
use crate::fixtures;
use crate::im_mapping::ImMapping;
use crate::mocks::{MockHttpTransport, MockResponse};
use crate::types::{ChannelId, Im, UserId};
use std::sync::Arc;

fn mapping(transport: &Arc<MockHttpTransport>, ims: Vec<Im>) -> ImMapping {
    ImMapping::new(Arc::new(api_with(test_config(), transport)), ims)
}

#[tokio::test]
async fn test_stored_mapping_returns_without_api_call() {
    let transport = Arc::new(MockHttpTransport::new());
    let ims = mapping(&transport, vec![Im::new("D1234567890", "U023BECGF")]);

    let channel = ims.im_for(&UserId::new("U023BECGF")).await.unwrap();

    assert_eq!(channel, ChannelId::new("D1234567890"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_missing_mapping_is_fetched() {
    let transport =
        Arc::new(MockHttpTransport::new().add_json_response(&fixtures::im_open("D1234567890")));
    let ims = mapping(&transport, vec![]);

    let channel = ims.im_for(&UserId::new("U023BECGF")).await.unwrap();

    assert_eq!(channel, ChannelId::new("D1234567890"));
    let request = transport.last_request().unwrap();
    assert_eq!(request.method(), "im.open");
    assert_eq!(request.field("user"), Some("U023BECGF"));
}

#[tokio::test]
async fn test_subsequent_lookups_do_not_hit_api() {
    let transport =
        Arc::new(MockHttpTransport::new().add_json_response(&fixtures::im_open("D1234567890")));
    let ims = mapping(&transport, vec![]);
    let user = UserId::new("U023BECGF");

    let first = ims.im_for(&user).await.unwrap();
    let second = ims.im_for(&user).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(ims.get(&user), Some(ChannelId::new("D1234567890")));
}

#[tokio::test]
async fn test_concurrent_misses_share_one_request() {
    let transport = Arc::new(
        MockHttpTransport::new()
            .add_response(MockResponse::json(&fixtures::im_open("D2")).with_delay(20))
            .with_default_response(MockResponse::json(&fixtures::im_open("D_UNEXPECTED"))),
    );
    let ims = mapping(&transport, vec![]);
    let user = UserId::new("U2");

    let (a, b, c) = tokio::join!(ims.im_for(&user), ims.im_for(&user), ims.im_for(&user));

    assert_eq!(a.unwrap(), ChannelId::new("D2"));
    assert_eq!(b.unwrap(), ChannelId::new("D2"));
    assert_eq!(c.unwrap(), ChannelId::new("D2"));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_different_users_resolve_independently() {
    let transport = Arc::new(
        MockHttpTransport::new()
            .add_json_response(&fixtures::im_open("D1"))
            .add_json_response(&fixtures::im_open("D2")),
    );
    let ims = mapping(&transport, vec![]);

    assert_eq!(ims.im_for(&"U1".into()).await.unwrap(), ChannelId::new("D1"));
    assert_eq!(ims.im_for(&"U2".into()).await.unwrap(), ChannelId::new("D2"));
    assert_eq!(ims.len(), 2);
}

#[tokio::test]
async fn test_api_error_is_propagated() {
    let transport = Arc::new(
        MockHttpTransport::new().add_json_response(&fixtures::slack_error("user_not_found")),
    );
    let ims = mapping(&transport, vec![]);

    let err = ims.im_for(&"U9".into()).await.unwrap_err();

    assert_eq!(err.slack_error_code(), Some("user_not_found"));
    assert!(ims.is_empty());
}

#[tokio::test]
async fn test_added_mappings_are_used() {
    let transport = Arc::new(MockHttpTransport::new());
    let ims = mapping(&transport, vec![]);

    ims.add_mapping(Im::new("D5", "U5"));
    ims.add_mappings(vec![Im::new("D6", "U6"), Im::new("D7", "U5")]);

    assert_eq!(ims.im_for(&"U5".into()).await.unwrap(), ChannelId::new("D7"));
    assert_eq!(ims.im_for(&"U6".into()).await.unwrap(), ChannelId::new("D6"));
    assert_eq!(transport.request_count(), 0);
}
