//! Hit type registration and field membership.
//!
//! The "Hit type" entry's description is the authoritative list of hit types,
//! written as quoted names in prose:
//!
//! ```text
//! The type of hit. Must be one of 'pageview', 'screenview', 'event', 'transaction'.
//! ```
//!
//! Each name becomes a hit type, next to the synthetic `client` type that
//! collects the parameters tagged `all`.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::model::{ALL_HIT_TYPES, CLIENT_HIT_TYPE, Extraction};

lazy_static! {
    /// A hit type name quoted inside the enumeration prose.
    static ref QUOTED_NAME: Regex = Regex::new(r#"['"]([a-z]+)['"]"#).unwrap();
}

/// Which fields belong to which hit type.
///
/// Members are indices into `Extraction::fields`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    members: BTreeMap<String, Vec<usize>>,
}

impl Registry {
    /// Registers every enumerated hit type and assigns fields to them.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::InvalidEnumeration` if the enumeration is malformed
    /// - `GeneratorError::UnknownHitType` if a field names an undeclared type,
    ///   or names none at all (reported with an empty `name`)
    pub fn build(extraction: &Extraction) -> Result<Self, GeneratorError> {
        info!("Building hit types");

        let mut members: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        members.insert(CLIENT_HIT_TYPE.to_string(), Vec::new());
        for name in parse_hit_type_names(&extraction.hit_type_docs)? {
            members.entry(name).or_default();
        }

        for (index, field) in extraction.fields.iter().enumerate() {
            if field.hit_types.is_empty() {
                return Err(GeneratorError::UnknownHitType {
                    name: String::new(),
                    param: field.param.clone(),
                });
            }

            for hit_type in &field.hit_types {
                let resolved = if hit_type == ALL_HIT_TYPES {
                    CLIENT_HIT_TYPE
                } else {
                    hit_type.as_str()
                };

                let Some(fields) = members.get_mut(resolved) else {
                    return Err(GeneratorError::UnknownHitType {
                        name: hit_type.clone(),
                        param: field.param.clone(),
                    });
                };

                // A type listed twice in one cell still holds the field once
                if !fields.contains(&index) {
                    fields.push(index);
                }
            }
        }

        debug!("Registered {} hit types", members.len());
        Ok(Self { members })
    }

    /// Hit type names in lexicographic order, `client` included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Field indices that belong to `name`, or an empty slice.
    pub fn members(&self, name: &str) -> &[usize] {
        self.members.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates `(name, members)` pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.members
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    /// Number of hit types, `client` included.
    pub fn hit_type_count(&self) -> usize {
        self.members.len()
    }
}

/// Parses the quoted hit type names out of the enumeration prose.
///
/// ## Examples
///
/// ```
/// use beacon_gen::registry::parse_hit_type_names;
///
/// let names = parse_hit_type_names("Must be one of 'pageview', 'event'.").unwrap();
/// assert_eq!(names, vec!["pageview", "event"]);
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidEnumeration` for any comma separated item
/// that does not hold exactly one quoted name.
pub fn parse_hit_type_names(docs: &str) -> Result<Vec<String>, GeneratorError> {
    docs.split(',')
        .map(|item| {
            let names: Vec<&str> = QUOTED_NAME
                .captures_iter(item)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect();
            match names.as_slice() {
                [name] => Ok((*name).to_string()),
                _ => Err(GeneratorError::InvalidEnumeration {
                    item: item.trim().to_string(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_extraction, raw_field, sample_extraction};

    #[test]
    fn parses_single_quoted_names() {
        let names = parse_hit_type_names(
            "The type of hit. Must be one of 'pageview', 'screenview', 'event'.",
        )
        .unwrap();
        assert_eq!(names, vec!["pageview", "screenview", "event"]);
    }

    #[test]
    fn parses_double_quoted_names() {
        let names = parse_hit_type_names(r#""pageview", "event""#).unwrap();
        assert_eq!(names, vec!["pageview", "event"]);
    }

    #[test]
    fn rejects_item_without_name() {
        let result = parse_hit_type_names("'pageview', and more");
        assert!(matches!(
            result,
            Err(GeneratorError::InvalidEnumeration { item }) if item == "and more"
        ));
    }

    #[test]
    fn rejects_item_with_two_names() {
        let result = parse_hit_type_names("'pageview' or 'event'");
        assert!(matches!(result, Err(GeneratorError::InvalidEnumeration { .. })));
    }

    #[test]
    fn client_is_always_registered() {
        let registry = Registry::build(&make_extraction(&["event"], vec![])).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["client", "event"]);
        assert!(registry.members("client").is_empty());
    }

    #[test]
    fn all_fields_go_to_client() {
        let extraction = sample_extraction();
        let registry = Registry::build(&extraction).unwrap();

        let client: Vec<&str> = registry
            .members("client")
            .iter()
            .map(|&i| extraction.fields[i].param.as_str())
            .collect();
        assert_eq!(client, vec!["v", "cid", "ni", "cd<dimensionIndex>"]);
    }

    #[test]
    fn field_lands_in_every_declared_type() {
        let extraction = sample_extraction();
        let registry = Registry::build(&extraction).unwrap();

        for (index, field) in extraction.fields.iter().enumerate() {
            for hit_type in &field.hit_types {
                let resolved = if hit_type == "all" { "client" } else { hit_type.as_str() };
                let count = registry
                    .members(resolved)
                    .iter()
                    .filter(|&&i| i == index)
                    .count();
                assert_eq!(count, 1, "{} in {}", field.param, resolved);
            }
        }
    }

    #[test]
    fn members_keep_declaration_order() {
        let extraction = sample_extraction();
        let registry = Registry::build(&extraction).unwrap();

        let event: Vec<&str> = registry
            .members("event")
            .iter()
            .map(|&i| extraction.fields[i].param.as_str())
            .collect();
        assert_eq!(event, vec!["ec", "ea", "ev", "dt"]);
    }

    #[test]
    fn duplicate_type_in_cell_is_registered_once() {
        let extraction = make_extraction(
            &["event"],
            vec![raw_field("Event Category", "ec", "text", &["event", "event"])],
        );
        let registry = Registry::build(&extraction).unwrap();
        assert_eq!(registry.members("event"), &[0]);
    }

    #[test]
    fn unknown_hit_type_is_fatal() {
        let extraction = make_extraction(
            &["event"],
            vec![raw_field("Social Network", "sn", "text", &["social"])],
        );
        let result = Registry::build(&extraction);
        assert!(matches!(
            result,
            Err(GeneratorError::UnknownHitType { name, param }) if name == "social" && param == "sn"
        ));
    }

    #[test]
    fn duplicate_type_apart_in_cell_is_registered_once() {
        let extraction = make_extraction(
            &["event"],
            vec![raw_field("Event Category", "ec", "text", &["event", "all", "event"])],
        );
        let registry = Registry::build(&extraction).unwrap();
        assert_eq!(registry.members("event"), &[0]);
        assert_eq!(registry.members("client"), &[0]);
    }

    #[test]
    fn field_without_hit_types_is_fatal() {
        let extraction = make_extraction(&["event"], vec![raw_field("Orphan", "or", "text", &[])]);
        let result = Registry::build(&extraction);
        assert!(matches!(
            result,
            Err(GeneratorError::UnknownHitType { name, param }) if name.is_empty() && param == "or"
        ));
    }

    #[test]
    #[tracing_test::traced_test]
    fn build_logs_registered_count() {
        let registry = Registry::build(&sample_extraction()).unwrap();
        assert_eq!(registry.hit_type_count(), registry.names().count());
        assert!(logs_contain("Registered"));
    }
}
