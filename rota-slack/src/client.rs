//! Blocking Slack Web API client.

use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::{json, Value};

use rota_core::{GroupId, MemberId};
use rota_sync::{Announcer, GatewayError, GroupGateway};

use crate::envelope::{check_envelope, unwrap_envelope, UsersList};
use crate::error::SlackError;

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Display name and icon used for the weekly announcement.
pub const BOT_USERNAME: &str = "schedule-bot";
pub const BOT_ICON: &str = ":calendar:";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USERS_LIST: &str = "usergroups.users.list";
const USERS_UPDATE: &str = "usergroups.users.update";
const POST_MESSAGE: &str = "chat.postMessage";

pub struct SlackClient {
    agent: ureq::Agent,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Point the client at another API root (tests, proxies).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent,
            token: token.into(),
            base_url,
        }
    }

    /// Current members of `group`.
    pub fn list_group_members(&self, group: &GroupId) -> Result<BTreeSet<MemberId>, SlackError> {
        tracing::debug!("{USERS_LIST} usergroup={group}");
        let request = self
            .agent
            .get(&self.url(USERS_LIST))
            .set("Authorization", &self.bearer())
            .query("usergroup", &group.0);
        let value = finish(USERS_LIST, request.call())?;
        let list: UsersList = unwrap_envelope(USERS_LIST, value)?;
        Ok(list.users.into_iter().map(MemberId::from).collect())
    }

    /// Replace the membership of `group` with `members`.
    pub fn update_group_members(
        &self,
        group: &GroupId,
        members: &BTreeSet<MemberId>,
    ) -> Result<(), SlackError> {
        let users = members
            .iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(",");
        tracing::debug!("{USERS_UPDATE} usergroup={group} users={users}");
        let request = self
            .agent
            .post(&self.url(USERS_UPDATE))
            .set("Authorization", &self.bearer());
        let value = finish(
            USERS_UPDATE,
            request.send_json(json!({ "usergroup": group.0, "users": users })),
        )?;
        check_envelope(USERS_UPDATE, value)
    }

    pub fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        tracing::debug!("{POST_MESSAGE} channel={channel}");
        let request = self
            .agent
            .post(&self.url(POST_MESSAGE))
            .set("Authorization", &self.bearer());
        let value = finish(
            POST_MESSAGE,
            request.send_json(json!({
                "channel": channel,
                "text": text,
                "username": BOT_USERNAME,
                "icon_emoji": BOT_ICON,
            })),
        )?;
        check_envelope(POST_MESSAGE, value)
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

fn finish(
    method: &'static str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<Value, SlackError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => return Err(SlackError::Http { method, status }),
        Err(other) => {
            return Err(SlackError::Transport {
                method,
                message: other.to_string(),
            })
        }
    };
    let body = response.into_string().map_err(|e| SlackError::Transport {
        method,
        message: e.to_string(),
    })?;
    serde_json::from_str(&body).map_err(|source| SlackError::Json { method, source })
}

impl GroupGateway for SlackClient {
    fn read_members(&self, group: &GroupId) -> Result<BTreeSet<MemberId>, GatewayError> {
        self.list_group_members(group).map_err(GatewayError::from)
    }

    fn write_members(
        &self,
        group: &GroupId,
        desired: &BTreeSet<MemberId>,
    ) -> Result<(), GatewayError> {
        self.update_group_members(group, desired)
            .map_err(GatewayError::from)
    }
}

impl Announcer for SlackClient {
    fn announce(&self, channel: &str, text: &str) -> Result<(), GatewayError> {
        self.post_message(channel, text).map_err(GatewayError::from)
    }
}
