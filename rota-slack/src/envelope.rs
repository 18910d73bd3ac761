//! Slack response envelopes.
//!
//! Every Web API answer is a JSON object with an `ok` flag. Failures carry
//! an `error` code; successes may carry a `warning` next to the payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SlackError;

/// Payload of `usergroups.users.list`.
#[derive(Debug, Deserialize)]
pub struct UsersList {
    #[serde(default)]
    pub users: Vec<String>,
}

/// Check the `ok` flag and decode the payload.
pub fn unwrap_envelope<T: DeserializeOwned>(
    method: &'static str,
    value: Value,
) -> Result<T, SlackError> {
    let ok = value.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_string();
        return Err(SlackError::Api { method, error });
    }
    if let Some(warning) = value.get("warning").and_then(Value::as_str) {
        tracing::debug!("{method} warning: {warning}");
    }
    serde_json::from_value(value).map_err(|source| SlackError::Json { method, source })
}

/// Like [`unwrap_envelope`] when the payload is not needed.
pub fn check_envelope(method: &'static str, value: Value) -> Result<(), SlackError> {
    unwrap_envelope::<Value>(method, value).map(|_| ())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_envelope_yields_payload() {
        let users: UsersList = unwrap_envelope(
            "usergroups.users.list",
            json!({"ok": true, "users": ["U1", "U2"]}),
        )
        .expect("ok");
        assert_eq!(users.users, ["U1", "U2"]);
    }

    #[test]
    fn missing_ok_flag_is_an_error() {
        let err = check_envelope("chat.postMessage", json!({"channel": "C1"})).unwrap_err();
        assert!(matches!(err, SlackError::Api { ref error, .. } if error == "unknown_error"));
    }

    #[test]
    fn error_code_is_kept() {
        let err = check_envelope(
            "chat.postMessage",
            json!({"ok": false, "error": "channel_not_found"}),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "chat.postMessage returned error 'channel_not_found'"
        );
    }

    #[test]
    fn wrong_payload_shape_is_json_error() {
        let err = unwrap_envelope::<UsersList>(
            "usergroups.users.list",
            json!({"ok": true, "users": "U1"}),
        )
        .unwrap_err();
        assert!(matches!(err, SlackError::Json { .. }));
    }
}
