//! Shared test utilities for beacon-gen tests.
//!
//! Builders for raw rows and small parameter reference pages, so each test
//! states only the columns it cares about.

use crate::model::{Extraction, RawField};

/// Escapes text for inclusion in an HTML fixture.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders one parameter entry the way the reference page lays it out.
///
/// ## Arguments
///
/// * `name` - Display name in the heading anchor
/// * `required` - Whether the indicator block says "Required" or "Optional"
/// * `docs` - Description paragraph
/// * `param` - Wire key (may contain `<index>` placeholders)
/// * `kind` - Declared value kind
/// * `hit_types` - Comma separated hit type cell
pub fn entry_html(
    name: &str,
    required: bool,
    docs: &str,
    param: &str,
    kind: &str,
    hit_types: &str,
) -> String {
    let indicator = if required { "Required for all hit types." } else { "Optional." };
    format!(
        "<h3><a name=\"{anchor}\">{name}</a></h3>\n\
         <div class=\"ind\">\n\
         <p>{indicator}</p>\n\
         <p>{docs}</p>\n\
         <table>\n\
         <tr><th>Parameter</th><th>Value Type</th><th>Default Value</th><th>Max Length</th><th>Supported Hit Types</th></tr>\n\
         <tr><td>{param}</td><td>{kind}</td><td>None</td><td>500 Bytes</td><td>{hit_types}</td></tr>\n\
         </table>\n\
         <div>Example value: sample</div>\n\
         </div>\n",
        anchor = escape(&name.to_lowercase()),
        name = escape(name),
        docs = escape(docs),
        param = escape(param),
        kind = escape(kind),
        hit_types = escape(hit_types),
    )
}

/// Wraps rendered entries into a complete page.
pub fn reference_html(entries: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Parameter Reference</title></head><body>\n{}</body></html>",
        entries.concat()
    )
}

/// Creates a raw row with the given identity and defaults for the rest.
pub fn raw_field(name: &str, param: &str, kind: &str, hit_types: &[&str]) -> RawField {
    RawField {
        name: name.to_string(),
        docs: format!("Documentation for {name}."),
        param: param.to_string(),
        kind: kind.to_string(),
        default: "None".to_string(),
        max_len: String::new(),
        examples: String::new(),
        required: true,
        hit_types: hit_types.iter().map(|t| t.to_string()).collect(),
    }
}

/// Creates an optional raw row.
pub fn optional_field(name: &str, param: &str, kind: &str, hit_types: &[&str]) -> RawField {
    RawField {
        required: false,
        ..raw_field(name, param, kind, hit_types)
    }
}

/// Creates an extraction over the given rows and hit type names.
pub fn make_extraction(hit_types: &[&str], fields: Vec<RawField>) -> Extraction {
    let quoted: Vec<String> = hit_types.iter().map(|t| format!("'{t}'")).collect();
    Extraction {
        fields,
        hit_type_docs: format!("The type of hit. Must be one of {}.", quoted.join(", ")),
        discriminator: Some("t".to_string()),
    }
}

/// A small protocol: common fields, an event type and an item type.
pub fn sample_extraction() -> Extraction {
    make_extraction(
        &["event", "item", "pageview"],
        vec![
            raw_field("Protocol Version", "v", "text", &["all"]),
            raw_field("Client ID", "cid", "text", &["all"]),
            optional_field("Non-Interaction Hit", "ni", "boolean", &["all"]),
            optional_field("Custom Dimension", "cd<dimensionIndex>", "text", &["all"]),
            raw_field("Event Category", "ec", "text", &["event"]),
            optional_field("Event Action", "ea", "text", &["event"]),
            optional_field("Event Value", "ev", "integer", &["event"]),
            raw_field("Item Name", "in", "text", &["item"]),
            optional_field("Item Price", "ip", "currency", &["item"]),
            optional_field("Document Title", "dt", "text", &["pageview", "event"]),
        ],
    )
}
