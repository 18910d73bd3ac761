//! # rota-slack
//!
//! Blocking Slack Web API client for the weekly rotation.
//!
//! [`SlackClient`] implements both seams from `rota-sync`:
//! [`GroupGateway`](rota_sync::GroupGateway) over `usergroups.users.list` /
//! `usergroups.users.update`, and [`Announcer`](rota_sync::Announcer) over
//! `chat.postMessage`.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{SlackClient, BOT_ICON, BOT_USERNAME, DEFAULT_BASE_URL};
pub use error::SlackError;
