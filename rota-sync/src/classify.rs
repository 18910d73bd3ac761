//! Membership classifier: managed vs. non-managed members.

use std::collections::BTreeSet;

use rota_core::{IdentifierMapping, MemberId};

/// Exhaustive, disjoint split of a membership set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Members whose identifier is a value of the mapping.
    pub managed: BTreeSet<MemberId>,
    /// Everyone else; always carried into the desired membership.
    pub non_managed: BTreeSet<MemberId>,
}

/// Split `current` by identifier presence in `mapping`.
pub fn classify(current: &BTreeSet<MemberId>, mapping: &IdentifierMapping) -> Partition {
    let (managed, non_managed) = current
        .iter()
        .cloned()
        .partition(|id| mapping.is_managed(id));
    Partition {
        managed,
        non_managed,
    }
}
