//! The generation pipeline.
//!
//! Each stage borrows the previous stage's value and returns a new one:
//!
//! ```text
//! html --extract--> Extraction --build--> Registry
//!                  \--normalize--> Vec<Field> --finalize--> Vec<HitType> --render--> units
//! ```
//!
//! Any stage may fail; the first error ends the run and no unit is produced.

use tracing::info;

use crate::document::extract;
use crate::errors::GeneratorError;
use crate::finalize::finalize;
use crate::model::{Extraction, HitType};
use crate::normalize::normalize_fields;
use crate::output::{GeneratedUnit, render_units};
use crate::registry::Registry;
use crate::validation::validate_model;

/// Builds and validates the finalized hit type model.
///
/// ## Errors
///
/// Returns the first registry, normalization or validation error.
pub fn build_model(extraction: &Extraction) -> Result<Vec<HitType>, GeneratorError> {
    let registry = Registry::build(extraction)?;
    let fields = normalize_fields(&extraction.fields)?;
    let hit_types = finalize(&registry, &fields, extraction.discriminator.as_deref());
    validate_model(&hit_types)?;
    Ok(hit_types)
}

/// Generates every unit from already extracted rows.
///
/// ## Errors
///
/// Returns any error from [`build_model`] or from rendering.
pub fn generate(extraction: &Extraction) -> Result<Vec<GeneratedUnit>, GeneratorError> {
    let hit_types = build_model(extraction)?;
    let units = render_units(&hit_types)?;
    info!("Generated {} units", units.len());
    Ok(units)
}

/// Generates every unit from a parameter reference document.
///
/// ## Examples
///
/// ```
/// use beacon_gen::pipeline::generate_from_html;
///
/// let html = r#"
///     <h3><a>Hit type</a></h3>
///     <div>
///         <p>Required for all hit types.</p>
///         <p>The type of hit. Must be one of 'pageview', 'event'.</p>
///         <table><tr><td>t</td><td>text</td><td>None</td><td>None</td><td>all</td></tr></table>
///         <p>Example value: pageview</p>
///     </div>
/// "#;
///
/// let units = generate_from_html(html).unwrap();
/// let names: Vec<&str> = units.iter().map(|u| u.filename.as_str()).collect();
/// assert_eq!(names, vec!["mod.rs", "type-client.rs", "type-event.rs", "type-pageview.rs"]);
/// ```
///
/// ## Errors
///
/// Returns any extraction error, then anything [`generate`] returns.
pub fn generate_from_html(html: &str) -> Result<Vec<GeneratedUnit>, GeneratorError> {
    let extraction = extract(html)?;
    generate(&extraction)
}
