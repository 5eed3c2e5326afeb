//! Integration tests for Web API calls

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use slack_adapter::{Arguments, Attachment, ChannelId, SlackApiTrait, SlackError};
use wiremock::matchers::header;

#[tokio::test]
async fn test_call_posts_form_with_token() {
    let server = setup_mock_server().await;
    mock_method("auth.test")
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(success_response(json!({"ok": true, "user": "lita"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let response = api.call_api("auth.test", Arguments::new()).await.unwrap();

    assert_eq!(response["user"], "lita");
    let forms = received_forms(&server).await;
    assert_eq!(forms[0].get("token").map(String::as_str), Some(TOKEN));
    assert_eq!(forms[0].len(), 1);
}

#[tokio::test]
async fn test_post_message_encodes_attachments_and_defaults() {
    let server = setup_mock_server().await;
    mock_method("chat.postMessage")
        .respond_with(success_response(json!({"ok": true, "ts": "1234.5678"})))
        .mount(&server)
        .await;

    let config = config_for(&server)
        .unfurl_links(false)
        .link_names(true)
        .build()
        .unwrap();
    let api = api_for(config);
    let attachment = Attachment::new("attachment text");

    let response = api
        .post_message(
            &ChannelId::new("C024BE91L"),
            Arguments::new()
                .with("as_user", true)
                .with("attachments", vec![attachment]),
        )
        .await
        .unwrap();

    assert_eq!(response["ts"], "1234.5678");
    let form = &received_forms(&server).await[0];
    assert_eq!(form["channel"], "C024BE91L");
    assert_eq!(form["as_user"], "true");
    assert_eq!(form["unfurl_links"], "false");
    assert_eq!(form["link_names"], "1");
    assert!(!form.contains_key("parse"));
    let attachments: serde_json::Value = serde_json::from_str(&form["attachments"]).unwrap();
    assert_eq!(
        attachments,
        json!([{"fallback": "attachment text", "text": "attachment text"}])
    );
}

#[tokio::test]
async fn test_application_error() {
    let server = setup_mock_server().await;
    mock_method("chat.postMessage")
        .respond_with(success_response(json!({"ok": false, "error": "invalid_auth"})))
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let err = api
        .post_message(&ChannelId::new("C1"), Arguments::new().with("text", "hi"))
        .await
        .unwrap_err();

    assert_eq!(err.slack_error_code(), Some("invalid_auth"));
    assert_eq!(
        err.to_string(),
        "Slack API call to chat.postMessage returned an error: invalid_auth."
    );
}

#[tokio::test]
async fn test_transport_error_on_non_success_status() {
    let server = setup_mock_server().await;
    mock_method("channels.setTopic")
        .respond_with(ResponseTemplate::new(422).set_body_string("failed big time"))
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let err = api
        .set_topic(&ChannelId::new("C1"), "Topic")
        .await
        .unwrap_err();

    match err {
        SlackError::Transport {
            method,
            status,
            body,
            ..
        } => {
            assert_eq!(method, "channels.setTopic");
            assert_eq!(status, 422);
            assert_eq!(body, "failed big time");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = setup_mock_server().await;
    mock_method("rtm.start")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let err = api.rtm_start().await.unwrap_err();

    assert!(matches!(err, SlackError::Decode { .. }));
}

#[tokio::test]
async fn test_rtm_start_builds_team_data() {
    let server = setup_mock_server().await;
    mock_method("rtm.start")
        .respond_with(success_response(json!({
            "ok": true,
            "url": "wss://example.com/websocket",
            "self": {"id": "U0BOT", "name": "lita"},
            "users": [{"id": "U1", "name": "alice"}],
            "channels": [{"id": "C1", "name": "general"}],
            "ims": [{"id": "D1", "user": "U1"}]
        })))
        .mount(&server)
        .await;

    let api = api_for(config_for(&server).build().unwrap());
    let team = api.rtm_start().await.unwrap();

    assert_eq!(team.websocket_url, "wss://example.com/websocket");
    assert_eq!(team.self_user.name.as_deref(), Some("lita"));
    assert_eq!(team.ims[0].user_id.as_str(), "U1");
    assert_eq!(team.channels[0].name.as_deref(), Some("general"));
}
