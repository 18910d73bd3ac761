//! Announcement context: serializable rendering payload built from a
//! week's [`DutyAssignment`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rota_core::{schedule::format_table_date, DutyAssignment, GroupId, IdentifierMapping, PersonName};

/// Values the weekly template can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementContext {
    /// Evaluation date, formatted `Feb 09, 2026`.
    pub week_of: String,
    /// Mentions for the release artistry duty, in table order.
    pub release_artistry: Vec<String>,
    /// Mentions for the focused work duty, in table order.
    pub focused_work: Vec<String>,
    /// `<!subteam^ID>` when a user group is configured.
    pub group_mention: Option<String>,
}

impl AnnouncementContext {
    pub fn build(
        date: NaiveDate,
        assignment: &DutyAssignment,
        mapping: Option<&IdentifierMapping>,
        group: Option<&GroupId>,
    ) -> Self {
        Self {
            week_of: format_table_date(date),
            release_artistry: format_mentions(&assignment.release_artistry, mapping),
            focused_work: format_mentions(&assignment.focused_work, mapping),
            group_mention: group.map(|g| format!("<!subteam^{g}>")),
        }
    }
}

/// Turn names into mentions: `<@ID>` when mapped, `@Name` otherwise.
///
/// Fallbacks are not logged here; see [`unmapped_names`].
pub fn format_mentions(names: &[PersonName], mapping: Option<&IdentifierMapping>) -> Vec<String> {
    names
        .iter()
        .map(|name| match mapping.and_then(|m| m.lookup(name)) {
            Some(id) => format!("<@{id}>"),
            None => format!("@{name}"),
        })
        .collect()
}

/// Distinct names across both duties that will render as `@Name`, in
/// table order.
pub fn unmapped_names<'a>(
    assignment: &'a DutyAssignment,
    mapping: Option<&IdentifierMapping>,
) -> Vec<&'a PersonName> {
    let mut out: Vec<&PersonName> = Vec::new();
    for name in assignment
        .release_artistry
        .iter()
        .chain(assignment.focused_work.iter())
    {
        if mapping.and_then(|m| m.lookup(name)).is_none() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
