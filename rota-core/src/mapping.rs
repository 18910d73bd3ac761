//! Identifier mapping: the bijective table between rotation names and
//! member identifiers.
//!
//! Membership in this table is the only thing that makes a group member
//! "managed". The table is immutable once built.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::MappingError;
use crate::types::{MemberId, PersonName};

/// Validated name → identifier table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifierMapping {
    by_name: BTreeMap<PersonName, MemberId>,
    ids: BTreeSet<MemberId>,
}

impl IdentifierMapping {
    /// Build from `(name, id)` pairs, rejecting blanks and duplicates on
    /// either side.
    pub fn from_pairs<I, N, M>(pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: Into<String>,
    {
        let mut by_name = BTreeMap::new();
        let mut owner: BTreeMap<MemberId, PersonName> = BTreeMap::new();

        for (name, id) in pairs {
            let name = PersonName(name.into().trim().to_owned());
            let id = MemberId(id.into().trim().to_owned());
            if name.0.is_empty() {
                return Err(MappingError::Empty { field: "name" });
            }
            if id.0.is_empty() {
                return Err(MappingError::Empty { field: "identifier" });
            }
            if by_name.contains_key(&name) {
                return Err(MappingError::DuplicateName { name: name.0 });
            }
            if let Some(first) = owner.get(&id) {
                return Err(MappingError::DuplicateIdentifier {
                    id: id.0,
                    first: first.0.clone(),
                    second: name.0,
                });
            }
            owner.insert(id.clone(), name.clone());
            by_name.insert(name, id);
        }

        Ok(Self {
            by_name,
            ids: owner.into_keys().collect(),
        })
    }

    /// Parse a JSON object such as `{"Fabio": "U12345678"}`.
    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(text).map_err(|e| MappingError::Malformed(e.to_string()))?;
        Self::from_pairs(raw)
    }

    /// Identifier for `name`, if mapped.
    pub fn lookup(&self, name: &PersonName) -> Option<&MemberId> {
        self.by_name.get(name)
    }

    /// `true` when `id` is a value of this mapping.
    pub fn is_managed(&self, id: &MemberId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_managed() {
        let m = IdentifierMapping::from_pairs([("Alice", "U1"), ("Bob", "U2")]).expect("mapping");
        assert_eq!(m.lookup(&PersonName::from("Alice")), Some(&MemberId::from("U1")));
        assert!(m.lookup(&PersonName::from("Dana")).is_none());
        assert!(m.is_managed(&MemberId::from("U2")));
        assert!(!m.is_managed(&MemberId::from("U_Manager")));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn classification_is_by_value_not_name() {
        let m = IdentifierMapping::from_pairs([("U1", "X1")]).expect("mapping");
        assert!(!m.is_managed(&MemberId::from("U1")));
        assert!(m.is_managed(&MemberId::from("X1")));
    }

    #[test]
    fn duplicate_identifier_rejected() {
        let err = IdentifierMapping::from_pairs([("Alice", "U1"), ("Alicia", "U1")]).unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateIdentifier {
                id: "U1".into(),
                first: "Alice".into(),
                second: "Alicia".into(),
            }
        );
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = IdentifierMapping::from_pairs([("Bob", "U1"), (" Bob ", "U2")]).unwrap_err();
        assert!(matches!(err, MappingError::DuplicateName { .. }));
    }

    #[test]
    fn blank_fields_rejected() {
        let err = IdentifierMapping::from_pairs([("", "U1")]).unwrap_err();
        assert_eq!(err, MappingError::Empty { field: "name" });
        let err = IdentifierMapping::from_pairs([("Bob", "  ")]).unwrap_err();
        assert_eq!(err, MappingError::Empty { field: "identifier" });
    }

    #[test]
    fn from_json_parses_object() {
        let m = IdentifierMapping::from_json(r#"{"Fabio": "U12345678", "Joep": "U56789012"}"#)
            .expect("json");
        assert_eq!(m.lookup(&PersonName::from("Joep")), Some(&MemberId::from("U56789012")));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            IdentifierMapping::from_json("{not json").unwrap_err(),
            MappingError::Malformed(_)
        ));
        assert!(matches!(
            IdentifierMapping::from_json(r#"{"Fabio": 7}"#).unwrap_err(),
            MappingError::Malformed(_)
        ));
        assert!(matches!(
            IdentifierMapping::from_json(r#"["U1"]"#).unwrap_err(),
            MappingError::Malformed(_)
        ));
    }
}
