//! Channel member lookup.
//!
//! The list of members is derived differently per channel kind, chosen by
//! the ID prefix:
//!
//! - `C…` public channels: `channels.info`
//! - `G…` private groups: `groups.list`, then `mpim.list` when the group is
//!   not found there
//! - `D…` direct messages: `im.list`, yielding the single other participant
//!
//! A channel that cannot be found yields an empty roster rather than an
//! error.

use crate::api::{CallResult, SlackApiTrait};
use crate::errors::SlackResult;
use crate::types::{ChannelId, UserId};
use serde_json::Value;
use tracing::{debug, instrument};

/// User IDs of the members of a channel
#[instrument(skip_all, fields(channel = %channel))]
pub async fn roster<A>(api: &A, channel: &ChannelId) -> SlackResult<Vec<UserId>>
where
    A: SlackApiTrait + ?Sized,
{
    if channel.is_public_channel() {
        let response = api.channels_info(channel).await?;
        let members = response
            .get("channel")
            .and_then(|c| c.get("members"))
            .map(member_ids)
            .unwrap_or_default();
        return Ok(members);
    }

    if channel.is_group() {
        let groups = api.groups_list().await?;
        if let Some(group) = find_by_id(&groups, "groups", channel) {
            return Ok(group.get("members").map(member_ids).unwrap_or_default());
        }

        // mpim.list reports its channels under "groups" as well
        let mpims = api.mpim_list().await?;
        if let Some(mpim) = find_by_id(&mpims, "groups", channel) {
            return Ok(mpim.get("members").map(member_ids).unwrap_or_default());
        }

        debug!("Group not found in groups.list or mpim.list");
        return Ok(Vec::new());
    }

    if channel.is_dm() {
        let ims = api.im_list().await?;
        let user = find_by_id(&ims, "ims", channel)
            .and_then(|im| im.get("user"))
            .and_then(Value::as_str);
        return Ok(user.map(|u| vec![UserId::new(u)]).unwrap_or_default());
    }

    debug!("Unrecognized channel prefix");
    Ok(Vec::new())
}

fn find_by_id<'a>(response: &'a CallResult, key: &str, channel: &ChannelId) -> Option<&'a Value> {
    response
        .get(key)?
        .as_array()?
        .iter()
        .find(|entry| entry.get("id").and_then(Value::as_str) == Some(channel.as_str()))
}

fn member_ids(members: &Value) -> Vec<UserId> {
    members
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(UserId::new)
                .collect()
        })
        .unwrap_or_default()
}
