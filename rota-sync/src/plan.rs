//! Diff plan between current and desired membership.

use std::collections::BTreeSet;

use serde::Serialize;

use rota_core::MemberId;

/// Identifiers to add and remove. Empty means no write is needed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiffPlan {
    pub additions: BTreeSet<MemberId>,
    pub removals: BTreeSet<MemberId>,
}

impl DiffPlan {
    /// `additions = desired − current`, `removals = current − desired`.
    pub fn between(current: &BTreeSet<MemberId>, desired: &BTreeSet<MemberId>) -> Self {
        Self {
            additions: desired.difference(current).cloned().collect(),
            removals: current.difference(desired).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// `+2, -1` style counts for summary lines.
    pub fn counts(&self) -> String {
        format!("+{}, -{}", self.additions.len(), self.removals.len())
    }
}
