//! Validation of the finalized model.
//!
//! Runs before any unit is rendered so that a clash surfaces as a named
//! error instead of a Rust parse failure deep inside emission.
//!
//! ## Validation Checks
//!
//! - **Member collisions**: two fields of one hit type must not derive the same
//!   member name, and a `<member>_set` flag must not shadow another member
//! - **Method collisions**: a setter must not reuse a generated method name,
//!   client setters of required fields included
//! - **Client members**: fields of `client` must not reuse the transport
//!   members (`use_tls`, `http_client`, `hit_type`)

use std::collections::HashSet;

use crate::codegen::builder_struct::has_setter;
use crate::errors::GeneratorError;
use crate::model::HitType;

/// Method names every generated builder already defines.
const GENERATED_METHODS: &[&str] = &["new", "copy", "add_fields", "as_any", "set_type"];

/// Members the client unit adds on top of its fields.
const CLIENT_MEMBERS: &[&str] = &["use_tls", "http_client"];

/// Member holding the discriminator, present when the client has one.
pub const DISCRIMINATOR_MEMBER: &str = "hit_type";

/// Validates every hit type.
///
/// ## Errors
///
/// Returns the first `GeneratorError::NamingCollision` found.
pub fn validate_model(hit_types: &[HitType]) -> Result<(), GeneratorError> {
    hit_types.iter().try_for_each(validate_hit_type)
}

/// Validates one hit type's generated names.
///
/// ## Examples
///
/// ```
/// use beacon_gen::model::HitType;
/// use beacon_gen::validation::validate_hit_type;
///
/// let hit = HitType { name: "social".to_string(), struct_name: "Social".to_string(), ..Default::default() };
/// assert!(validate_hit_type(&hit).is_ok());
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::NamingCollision` when two generated names clash.
pub fn validate_hit_type(hit: &HitType) -> Result<(), GeneratorError> {
    let collision = |member: &str, reason: &str| GeneratorError::NamingCollision {
        hit_type: hit.name.clone(),
        member: member.to_string(),
        reason: reason.to_string(),
    };

    let mut members: HashSet<String> = HashSet::new();
    if hit.is_client() {
        members.extend(CLIENT_MEMBERS.iter().map(|m| m.to_string()));
        if hit.discriminator.is_some() {
            members.insert(DISCRIMINATOR_MEMBER.to_string());
        }
    }

    for field in &hit.fields {
        let member = field.member_name();
        if !members.insert(member.clone()) {
            return Err(collision(
                &member,
                "two parameters derive the same member name",
            ));
        }
    }

    for field in hit.fields.iter().filter(|f| !f.required) {
        let flag = field.set_flag_name();
        if !members.insert(flag.clone()) {
            return Err(collision(&flag, "set flag shadows another member"));
        }
    }

    for field in hit.fields.iter().filter(|f| has_setter(hit, f)) {
        let setter = field.setter_name();
        if GENERATED_METHODS.contains(&setter.as_str()) {
            return Err(collision(&setter, "setter reuses a generated method name"));
        }
    }

    Ok(())
}
