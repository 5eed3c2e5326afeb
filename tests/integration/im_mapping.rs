//! Integration tests for the IM channel cache

use super::*;
use serde_json::json;
use slack_adapter::{ChannelId, ImMapping, UserId};
use std::sync::Arc;

#[tokio::test]
async fn test_im_opened_once_per_user() {
    let server = setup_mock_server().await;
    mock_method("im.open")
        .respond_with(success_response(json!({"ok": true, "channel": {"id": "D024BFF1M"}})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let ims = ImMapping::new(Arc::new(api), Vec::new());
    let user = UserId::new("U023BECGF");

    assert_eq!(ims.im_for(&user).await.unwrap(), ChannelId::new("D024BFF1M"));
    assert_eq!(ims.im_for(&user).await.unwrap(), ChannelId::new("D024BFF1M"));

    let forms = received_forms(&server).await;
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["user"], "U023BECGF");
}

#[tokio::test]
async fn test_failed_open_is_not_cached() {
    let server = setup_mock_server().await;
    mock_method("im.open")
        .respond_with(success_response(json!({"ok": false, "error": "user_not_found"})))
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let ims = ImMapping::new(Arc::new(api), Vec::new());

    assert!(ims.im_for(&UserId::new("U404")).await.is_err());
    assert!(ims.im_for(&UserId::new("U404")).await.is_err());
    assert!(ims.is_empty());
    assert_eq!(received_forms(&server).await.len(), 2);
}
