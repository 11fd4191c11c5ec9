//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling each
//! hit type into a complete Rust unit, validating the output, formatting it,
//! and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! hits/
//! ├── mod.rs            # Module declarations and re-exports
//! ├── type-client.rs    # Shared parameters, HitType trait, set_type
//! ├── type-event.rs     # One builder per hit type
//! └── type-pageview.rs
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: Every unit is validated with `syn` before anything is written
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::quote;
use tracing::{debug, info};

use crate::codegen::{
    UnitDocBuilder, generate_builder_impl, generate_client_add_fields, generate_hit_type_impl,
    generate_hit_type_trait, generate_imports, generate_set_type, generate_struct, mod_rs_docs,
};
use crate::errors::GeneratorError;
use crate::model::HitType;
use crate::naming::rust_ident;

/// Filename of the unit declaring every hit type module.
pub const MOD_RS: &str = "mod.rs";

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// File name relative to the output directory.
    pub filename: String,
    /// Formatted Rust source.
    pub content: String,
}

/// Assembles the token stream of one hit type unit.
///
/// Concrete units hold the builder and its `HitType` impl. The client unit
/// holds the trait, the shared builder and the dispatcher.
pub fn assemble_hit_type_unit(hit: &HitType) -> TokenStream {
    let docs = UnitDocBuilder::new(hit).build();
    let imports = generate_imports(hit);
    let builder_struct = generate_struct(hit);

    if hit.is_client() {
        let hit_type_trait = generate_hit_type_trait();
        let mut extra = generate_set_type(hit);
        extra.extend(generate_client_add_fields(hit));
        let builder_impl = generate_builder_impl(hit, extra);

        quote! {
            #docs

            #imports

            #hit_type_trait

            #builder_struct

            #builder_impl
        }
    } else {
        let builder_impl = generate_builder_impl(hit, TokenStream::new());
        let hit_type_impl = generate_hit_type_impl(hit);

        quote! {
            #docs

            #imports

            #builder_struct

            #builder_impl

            #hit_type_impl
        }
    }
}

/// Assembles `mod.rs`, declaring each unit by path and re-exporting it.
pub fn assemble_mod_rs(hit_types: &[HitType]) -> TokenStream {
    let docs = mod_rs_docs(hit_types);
    let modules = hit_types.iter().map(|hit| {
        let path = hit.filename();
        let module = rust_ident(&hit.name);
        quote! {
            #[path = #path]
            mod #module;
            pub use #module::*;
        }
    });

    quote! {
        #docs

        #(#modules)*
    }
}

/// Validates generated code by parsing it with syn.
///
/// ## Errors
///
/// Returns `GeneratorError::Template` with a numbered listing of `unit` if
/// the code fails to parse.
pub fn validate_code(unit: &str, tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone()).map_err(|e| GeneratorError::Template {
        unit: unit.to_string(),
        listing: numbered_listing(&tokens.to_string()),
        message: e.to_string(),
    })
}

/// Breaks unformatted tokens into lines and numbers them.
fn numbered_listing(code: &str) -> String {
    let broken = code
        .replace("; ", ";\n")
        .replace("{ ", "{\n")
        .replace("} ", "}\n");

    broken
        .lines()
        .enumerate()
        .map(|(index, line)| format!("{:>3}: {}", index + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats generated code using prettyplease.
///
/// Prepends the auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by beacon-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Validates, formats and names one unit.
///
/// ## Errors
///
/// Returns `GeneratorError::Template` if the unit is not valid Rust.
pub fn render_unit(filename: &str, tokens: &TokenStream) -> Result<GeneratedUnit, GeneratorError> {
    let file = validate_code(filename, tokens)?;
    let content = format_code(&file);
    debug!("Rendered {} ({} bytes)", filename, content.len());

    Ok(GeneratedUnit {
        filename: filename.to_string(),
        content,
    })
}

/// Renders every hit type unit plus `mod.rs`, sorted by filename.
///
/// ## Errors
///
/// Returns the first `GeneratorError::Template`; no unit is returned then.
pub fn render_units(hit_types: &[HitType]) -> Result<Vec<GeneratedUnit>, GeneratorError> {
    info!("Generating {} hit type units", hit_types.len());

    let mut units = hit_types
        .iter()
        .map(|hit| render_unit(&hit.filename(), &assemble_hit_type_unit(hit)))
        .collect::<Result<Vec<_>, _>>()?;

    units.push(render_unit(MOD_RS, &assemble_mod_rs(hit_types))?);
    units.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(units)
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Writes every unit into `output_dir`, or prints them when `dry_run`.
///
/// ## Arguments
///
/// * `output_dir` - Directory to write generated files to
/// * `units` - Rendered units, written verbatim
/// * `dry_run` - If true, print code instead of writing files
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if any file cannot be written.
pub fn write_units(
    output_dir: &Path,
    units: &[GeneratedUnit],
    dry_run: bool,
) -> Result<(), GeneratorError> {
    if dry_run {
        for unit in units {
            println!("=== {} ===\n{}\n", unit.filename, unit.content);
        }
        return Ok(());
    }

    for unit in units {
        let path = output_dir.join(&unit.filename);
        write_atomic(&path, &unit.content)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
