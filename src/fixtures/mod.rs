//! Test fixtures for Slack API responses.
//!
//! Canned response bodies shaped like the ones Slack returns.

use serde_json::{json, Value};

/// Bare success
pub fn ok() -> Value {
    json!({ "ok": true })
}

/// Slack application error
pub fn slack_error(code: &str) -> Value {
    json!({ "ok": false, "error": code })
}

/// `im.open` response
pub fn im_open(channel_id: &str) -> Value {
    json!({ "ok": true, "channel": { "id": channel_id } })
}

/// `channels.info` response
pub fn channels_info(channel_id: &str, members: &[&str]) -> Value {
    json!({
        "ok": true,
        "channel": { "id": channel_id, "name": "general", "members": members }
    })
}

/// `groups.list` or `mpim.list` response; both list under `groups`
pub fn groups_list(groups: &[(&str, &[&str])]) -> Value {
    let groups: Vec<Value> = groups
        .iter()
        .map(|(id, members)| json!({ "id": id, "members": members }))
        .collect();
    json!({ "ok": true, "groups": groups })
}

/// `im.list` response
pub fn im_list(ims: &[(&str, &str)]) -> Value {
    let ims: Vec<Value> = ims
        .iter()
        .map(|(id, user)| json!({ "id": id, "user": user }))
        .collect();
    json!({ "ok": true, "ims": ims })
}

/// `rtm.start` response
pub fn rtm_start() -> Value {
    json!({
        "ok": true,
        "url": "wss://example.com/",
        "users": [{ "id": "U023BECGF", "name": "bob" }],
        "ims": [{ "id": "D024BFF1M" }],
        "self": { "id": "U12345678", "name": "lita" },
        "channels": [{ "id": "C1234567890", "name": "general" }],
        "groups": [{ "id": "G0987654321", "name": "secret" }]
    })
}
