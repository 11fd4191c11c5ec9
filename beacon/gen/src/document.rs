//! Parameter reference extraction.
//!
//! The protocol's parameter reference is an HTML page where every parameter
//! is an `h3` heading followed by a block element. The block's children are
//! read positionally:
//!
//! ```text
//! <h3><a>Event Action</a></h3>
//! <div>
//!   <p>Optional.</p>                      <!-- 0: required indicator -->
//!   <p>Specifies the event action.</p>    <!-- 1: description -->
//!   <table>                               <!-- 2: param, kind, default, max len, hit types -->
//!     <tr><td>ea</td><td>text</td><td>None</td><td>500 Bytes</td><td>event</td></tr>
//!   </table>
//!   <div>Example value: Play</div>        <!-- 3: examples -->
//! </div>
//! ```
//!
//! The "Hit type" entry is not a builder field: its description enumerates
//! every hit type name and its key becomes the discriminator.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::model::{Extraction, RawField};

/// Display name of the entry whose description lists the hit types.
pub const HIT_TYPE_ENTRY: &str = "Hit type";

/// Marker the required indicator block uses for optional parameters.
const OPTIONAL_MARKER: &str = "Optional";

/// Extracts every parameter entry from a parameter reference page.
///
/// ## Errors
///
/// - `GeneratorError::ParseError` if the page holds no `h3` entries
/// - `GeneratorError::MissingHitTypeEntry` if no entry is named "Hit type"
pub fn extract(html: &str) -> Result<Extraction, GeneratorError> {
    let document = Html::parse_document(html);
    let headings = parse_selector("h3")?;
    let anchors = parse_selector("a")?;
    let cells = parse_selector("tr td")?;

    let mut fields = Vec::new();
    let mut hit_type_entry = None;
    let mut entries = 0usize;

    for heading in document.select(&headings) {
        entries += 1;
        let field = read_entry(heading, &anchors, &cells);
        if field.name == HIT_TYPE_ENTRY {
            hit_type_entry = Some(field);
        } else {
            fields.push(field);
        }
    }

    if entries == 0 {
        return Err(GeneratorError::ParseError(
            "no parameter entries (h3 headings) found".to_string(),
        ));
    }

    let entry = hit_type_entry.ok_or(GeneratorError::MissingHitTypeEntry)?;
    debug!("Extracted {} parameter entries", fields.len());

    Ok(Extraction {
        fields,
        hit_type_docs: entry.docs,
        discriminator: (!entry.param.is_empty()).then_some(entry.param),
    })
}

/// Reads one heading and its sibling block into a raw field.
///
/// Missing children or cells read as empty strings.
fn read_entry(heading: ElementRef<'_>, anchors: &Selector, cells: &Selector) -> RawField {
    let name = heading
        .select(anchors)
        .next()
        .map(text_of)
        .unwrap_or_else(|| text_of(heading));

    let content: Vec<ElementRef<'_>> = heading
        .next_siblings()
        .find_map(ElementRef::wrap)
        .map(|block| block.children().filter_map(ElementRef::wrap).collect())
        .unwrap_or_default();

    let part = |index: usize| content.get(index).map(|e| text_of(*e)).unwrap_or_default();

    let cell_texts: Vec<String> = content
        .get(2)
        .map(|table| table.select(cells).map(text_of).collect())
        .unwrap_or_default();
    let cell = |index: usize| cell_texts.get(index).cloned().unwrap_or_default();

    RawField {
        name,
        required: !part(0).contains(OPTIONAL_MARKER),
        docs: part(1),
        param: cell(0),
        kind: cell(1),
        default: cell(2),
        max_len: cell(3),
        hit_types: split_hit_types(&cell(4)),
        examples: part(3),
    }
}

/// Splits a comma separated hit type cell, dropping empty items.
pub fn split_hit_types(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects an element's text, trimmed.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a CSS selector string, returning an error for invalid selectors.
fn parse_selector(selector_str: &str) -> Result<Selector, GeneratorError> {
    Selector::parse(selector_str)
        .map_err(|_| GeneratorError::ParseError(format!("invalid selector '{selector_str}'")))
}
