//! Field normalization.
//!
//! Turns each raw row into a [`Field`]: a Rust-friendly identifier, a value
//! type, corrected required flag, wrapped docs and a parsed parameter key.
//! Rows are normalized independently of each other.

use std::borrow::Cow;

use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::model::{Field, RawField, ValueType};
use crate::naming::{export_name, first_rune_to_lower};
use crate::parser::ParamTemplate;

/// Width of a wrapped documentation line.
pub const DOC_WIDTH: usize = 56;

/// Parameters the document calls required that callers default themselves.
const ALWAYS_OPTIONAL: &[&str] = &["ProtocolVersion", "ClientID"];

/// Sentence that marks a parameter required regardless of its table cell.
const NOT_EMPTY_MARKER: &str = "Must not be empty.";

/// Identifier of the discriminator parameter, kept internal.
const DISCRIMINATOR_NAME: &str = "HitType";

/// Normalizes every raw row, in order.
///
/// ## Errors
///
/// Propagates the first error from [`normalize_field`].
pub fn normalize_fields(raw: &[RawField]) -> Result<Vec<Field>, GeneratorError> {
    info!("Processing fields");
    raw.iter().map(normalize_field).collect()
}

/// Normalizes one raw row.
///
/// ## Errors
///
/// - `GeneratorError::InvalidFieldName` if the display name yields no identifier
/// - `GeneratorError::UnknownValueKind` if the declared kind is not one of
///   text, integer, boolean or currency
pub fn normalize_field(raw: &RawField) -> Result<Field, GeneratorError> {
    let mut name = derive_identifier(&raw.name, &raw.hit_types);
    if name.is_empty() {
        return Err(GeneratorError::InvalidFieldName {
            name: raw.name.clone(),
        });
    }
    let private_name = first_rune_to_lower(&name);

    let mut required = raw.required;
    if ALWAYS_OPTIONAL.contains(&name.as_str()) {
        required = false;
    }

    // The prose is right where the table cell is wrong
    let mut docs = Cow::Borrowed(raw.docs.as_str());
    if docs.contains(NOT_EMPTY_MARKER) {
        docs = Cow::Owned(docs.replacen(NOT_EMPTY_MARKER, "", 1));
        required = true;
    }

    if name == DISCRIMINATOR_NAME {
        name = first_rune_to_lower(&name);
    }

    let value_type =
        ValueType::from_kind(&raw.kind).ok_or_else(|| GeneratorError::UnknownValueKind {
            kind: raw.kind.clone(),
            param: raw.param.clone(),
        })?;

    let param_template = ParamTemplate::parse(&raw.param);
    let indices = param_template.indices();
    if !indices.is_empty() {
        debug!("Parameter '{}' needs indices {:?}", raw.param, indices);
    }

    Ok(Field {
        name,
        private_name,
        docs: doc_lines(&docs),
        param: raw.param.clone(),
        param_template,
        value_type,
        default: raw.default.clone(),
        max_len: raw.max_len.clone(),
        examples: raw.examples.clone(),
        required,
        hit_types: raw.hit_types.clone(),
        indices,
    })
}

/// Derives the export-cased identifier of a parameter.
///
/// Takes the text before the first `/`, export-cases it, drops every
/// non-letter, then strips the export-cased name of each owning hit type as a
/// prefix.
///
/// ## Examples
///
/// ```
/// use beacon_gen::normalize::derive_identifier;
///
/// assert_eq!(derive_identifier("Client ID", &["all".to_string()]), "ClientID");
/// assert_eq!(derive_identifier("Event Action", &["event".to_string()]), "Action");
/// assert_eq!(derive_identifier("Document location URL / page", &[]), "DocumentLocationURL");
/// ```
pub fn derive_identifier(display_name: &str, hit_types: &[String]) -> String {
    let before_slash = display_name.split('/').next().unwrap_or_default();
    let mut name: String = export_name(before_slash)
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();

    for hit_type in hit_types {
        let prefix = export_name(hit_type);
        if let Some(stripped) = name.strip_prefix(&prefix) {
            name = stripped.to_string();
        }
    }

    name
}

/// Wraps a description into comment lines of at most [`DOC_WIDTH`] columns.
pub fn doc_lines(docs: &str) -> Vec<String> {
    let text = docs.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Vec::new();
    }

    textwrap::wrap(&text, DOC_WIDTH)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}
