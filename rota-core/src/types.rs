//! Domain types for the rotation schedule and the managed user group.
//!
//! Identifiers are opaque strings wrapped in newtypes so a person's display
//! name can never be passed where a member identifier is expected.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Human-readable name as written in the rotation table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonName(pub String);

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PersonName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PersonName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque, stable member identifier on the messaging service (e.g. `U12345678`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of the user group whose membership is reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Duty categories
// ---------------------------------------------------------------------------

/// The two duties of the weekly rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyCategory {
    ReleaseArtistry,
    FocusedWork,
}

impl fmt::Display for DutyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyCategory::ReleaseArtistry => write!(f, "release_artistry"),
            DutyCategory::FocusedWork => write!(f, "focused_work"),
        }
    }
}

// ---------------------------------------------------------------------------
// Duty assignment
// ---------------------------------------------------------------------------

/// Who holds which duty for a single week.
///
/// Names keep the order they appear in the table so announcements read the
/// same as the source; set semantics are applied by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub release_artistry: Vec<PersonName>,
    pub focused_work: Vec<PersonName>,
}

impl DutyAssignment {
    pub fn new(release_artistry: Vec<PersonName>, focused_work: Vec<PersonName>) -> Self {
        Self {
            release_artistry,
            focused_work,
        }
    }

    /// Names on `category` for this week.
    pub fn names(&self, category: DutyCategory) -> &[PersonName] {
        match category {
            DutyCategory::ReleaseArtistry => &self.release_artistry,
            DutyCategory::FocusedWork => &self.focused_work,
        }
    }

    /// Names listed under both categories, sorted and deduplicated.
    ///
    /// A well-formed week returns an empty vector.
    pub fn double_booked(&self) -> Vec<PersonName> {
        let release: BTreeSet<&PersonName> = self.release_artistry.iter().collect();
        self.focused_work
            .iter()
            .filter(|name| release.contains(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
