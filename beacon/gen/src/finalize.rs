//! Hit type finalization.
//!
//! Gathers each hit type's fields, appends a synthesized field for every
//! index variable those fields need, and gives `client` the sorted list of
//! concrete hit types for its dispatch table.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::model::{CLIENT_HIT_TYPE, Field, HitType, ValueType};
use crate::naming::export_name;
use crate::parser::ParamTemplate;
use crate::registry::Registry;

/// Builds every finalized hit type, in lexicographic name order.
///
/// ## Arguments
///
/// * `registry` - Hit type membership over `fields`
/// * `fields` - Normalized fields, indexed like the extraction's rows
/// * `discriminator` - Wire key of the discriminator, attached to `client`
pub fn finalize(registry: &Registry, fields: &[Field], discriminator: Option<&str>) -> Vec<HitType> {
    info!("Finalizing {} hit types", registry.hit_type_count());

    let hit_type_ids: Vec<String> = concrete_hit_type_ids(registry);

    registry
        .iter()
        .map(|(name, members)| {
            let mut hit = finalize_hit_type(name, members, fields);
            if hit.is_client() {
                hit.hit_type_ids = hit_type_ids.clone();
                hit.discriminator = discriminator.map(str::to_string);
            }
            hit
        })
        .collect()
}

/// Builds one hit type from its member fields.
fn finalize_hit_type(name: &str, members: &[usize], fields: &[Field]) -> HitType {
    let mut hit_fields: Vec<Field> = members
        .iter()
        .filter_map(|&index| fields.get(index))
        .cloned()
        .collect();

    let indices: Vec<String> = hit_fields
        .iter()
        .flat_map(|f| f.indices.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    hit_fields.extend(indices.iter().map(|index| index_field(index)));

    debug!(
        "Hit type '{}': {} fields, {} indices",
        name,
        hit_fields.len(),
        indices.len()
    );

    HitType {
        name: name.to_string(),
        struct_name: export_name(name),
        fields: hit_fields,
        indices,
        hit_type_ids: Vec::new(),
        discriminator: None,
    }
}

/// Sorted names of every registered hit type except `client`.
fn concrete_hit_type_ids(registry: &Registry) -> Vec<String> {
    let mut ids: Vec<String> = registry
        .names()
        .filter(|name| *name != CLIENT_HIT_TYPE)
        .map(str::to_string)
        .collect();
    ids.sort();
    ids
}

/// Synthesizes the builder input for an index variable.
///
/// The field has no wire key of its own; other keys splice its value in.
pub fn index_field(index: &str) -> Field {
    let name = export_name(index);
    Field {
        docs: vec![format!("{name} is required by other properties")],
        name,
        private_name: index.to_string(),
        param: String::new(),
        param_template: ParamTemplate::default(),
        value_type: ValueType::String,
        default: String::new(),
        max_len: String::new(),
        examples: String::new(),
        required: false,
        hit_types: Vec::new(),
        indices: Vec::new(),
    }
}
