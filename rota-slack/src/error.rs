//! Error types for rota-slack.

use rota_sync::GatewayError;
use thiserror::Error;

/// Slack error codes that mean the token itself is the problem.
const AUTH_ERRORS: &[&str] = &[
    "not_authed",
    "invalid_auth",
    "account_inactive",
    "token_revoked",
    "token_expired",
    "missing_scope",
    "no_permission",
];

#[derive(Debug, Error)]
pub enum SlackError {
    /// Slack answered `{"ok": false, "error": ...}`.
    #[error("{method} returned error '{error}'")]
    Api { method: &'static str, error: String },

    /// Non-2xx HTTP status.
    #[error("{method} failed with HTTP {status}")]
    Http { method: &'static str, status: u16 },

    #[error("{method} transport error: {message}")]
    Transport { method: &'static str, message: String },

    #[error("{method} returned an unreadable body: {source}")]
    Json {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SlackError {
    /// `true` when retrying with the same token cannot succeed.
    pub fn is_auth(&self) -> bool {
        match self {
            SlackError::Api { error, .. } => AUTH_ERRORS.contains(&error.as_str()),
            SlackError::Http { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

impl From<SlackError> for GatewayError {
    fn from(err: SlackError) -> Self {
        if err.is_auth() {
            let detail = match &err {
                SlackError::Api { error, .. } => error.clone(),
                other => other.to_string(),
            };
            return GatewayError::Unauthorized(detail);
        }
        match err {
            SlackError::Api { method, error } => GatewayError::Api {
                method: method.to_string(),
                message: error,
            },
            other => GatewayError::Transport(other.to_string()),
        }
    }
}
