//! Seams to the messaging service.
//!
//! Each call is a single blocking operation that either returns a result or
//! fails. Group writes replace the full member set; implementations must not
//! apply incremental patches.

use std::collections::BTreeSet;

use rota_core::{GroupId, MemberId};

use crate::error::GatewayError;

/// Read and replace a user group's membership.
pub trait GroupGateway {
    /// Current members of `group`.
    fn read_members(&self, group: &GroupId) -> Result<BTreeSet<MemberId>, GatewayError>;

    /// Replace the membership of `group` with exactly `desired`.
    fn write_members(&self, group: &GroupId, desired: &BTreeSet<MemberId>)
        -> Result<(), GatewayError>;
}

/// Post the weekly announcement.
pub trait Announcer {
    fn announce(&self, channel: &str, text: &str) -> Result<(), GatewayError>;
}
