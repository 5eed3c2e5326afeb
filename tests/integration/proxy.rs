//! Integration tests for proxied calls

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use slack_adapter::Arguments;

#[tokio::test]
async fn test_calls_are_routed_through_proxy() {
    let proxy = setup_mock_server().await;
    mock_method("auth.test")
        .respond_with(success_response(json!({"ok": true, "user": "lita"})))
        .expect(1)
        .mount(&proxy)
        .await;

    // the API host never resolves, so a reply can only come from the proxy
    let config = SlackConfigBuilder::new()
        .token(TOKEN)
        .base_url("http://slack.invalid/api")
        .unwrap()
        .proxy(&proxy.uri())
        .unwrap()
        .build()
        .unwrap();
    let api = api_for(config);

    let response = api.call_api("auth.test", Arguments::new()).await.unwrap();

    assert_eq!(response["user"], "lita");
    let requests = proxy.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.host_str(), Some("slack.invalid"));
    let forms = received_forms(&proxy).await;
    assert_eq!(forms[0].get("token").map(String::as_str), Some(TOKEN));
}
