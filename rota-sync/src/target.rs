//! Target set builder: this week's release artistry members as identifiers.

use std::collections::BTreeSet;

use rota_core::{DutyAssignment, DutyCategory, IdentifierMapping, MemberId, PersonName};

/// Managed identifiers the group should contain, plus the names that could
/// not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetSet {
    pub members: BTreeSet<MemberId>,
    /// Distinct unmapped names, in first-seen order.
    pub unmapped: Vec<PersonName>,
}

/// Map every release artistry name through `mapping`.
///
/// Unmapped names are dropped with one warning each; repeated names
/// collapse.
pub fn build_target(assignment: &DutyAssignment, mapping: &IdentifierMapping) -> TargetSet {
    let mut target = TargetSet::default();
    let mut seen: BTreeSet<&PersonName> = BTreeSet::new();

    for name in assignment.names(DutyCategory::ReleaseArtistry) {
        if !seen.insert(name) {
            continue;
        }
        match mapping.lookup(name) {
            Some(id) => {
                target.members.insert(id.clone());
            }
            None => {
                tracing::warn!("no identifier found for name '{name}'; excluding from group");
                target.unmapped.push(name.clone());
            }
        }
    }
    target
}
