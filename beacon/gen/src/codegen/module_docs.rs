//! Module documentation for generated units.
//!
//! This module provides [`UnitDocBuilder`] for the `//!` header of each hit
//! type unit, and [`mod_rs_docs`] for the unit that ties them together.

use proc_macro2::TokenStream;
use quote::quote;

use crate::model::HitType;

/// Builds the module-level documentation of one hit type unit.
///
/// The documentation includes:
/// - An introduction naming the hit type and its builder
/// - A parameters section listing every wire key, required ones marked
///
/// ## Examples
///
/// ```ignore
/// let builder = UnitDocBuilder::new(&hit);
/// let doc_tokens = builder.build();
/// ```
pub struct UnitDocBuilder<'a> {
    hit: &'a HitType,
}

impl<'a> UnitDocBuilder<'a> {
    /// Creates a documentation builder for the given hit type.
    pub fn new(hit: &'a HitType) -> Self {
        Self { hit }
    }

    /// Builds the documentation as `#![doc = "..."]` attributes, one per line.
    pub fn build(&self) -> TokenStream {
        let mut lines = self.intro_paragraph();
        lines.push(String::new());
        lines.extend(self.parameters_section());

        quote! {
            #(#![doc = #lines])*
        }
    }

    fn intro_paragraph(&self) -> Vec<String> {
        let name = &self.hit.struct_name;
        if self.hit.is_client() {
            vec![
                format!(" Parameters shared by every hit, collected on [`{name}`]."),
                String::new(),
                " Concrete hits implement [`HitType`]; the client maps them back to".to_string(),
                " their discriminator.".to_string(),
            ]
        } else {
            vec![format!(
                " Builder for the `{}` hit type, see [`{name}`].",
                self.hit.name
            )]
        }
    }

    /// Lists the wire keys, in serialization order.
    fn parameters_section(&self) -> Vec<String> {
        let mut lines = vec![" ## Parameters".to_string(), String::new()];

        if let Some(key) = &self.hit.discriminator {
            lines.push(format!(" - `{key}`: hit type (set automatically)"));
        }

        for field in self.hit.fields.iter().filter(|f| f.has_param()) {
            let marker = if field.required { " (required)" } else { "" };
            lines.push(format!(" - `{}`: {}{}", field.param, field.name, marker));
        }

        if lines.len() == 2 {
            lines.push(" No parameters.".to_string());
        }

        lines
    }
}

/// Builds the documentation of `mod.rs`.
pub fn mod_rs_docs(hit_types: &[HitType]) -> TokenStream {
    let names: Vec<String> = hit_types
        .iter()
        .filter(|h| !h.is_client())
        .map(|h| format!("[`{}`]", h.struct_name))
        .collect();

    let listing = if names.is_empty() {
        " No concrete hit types are defined.".to_string()
    } else {
        format!(" Builders: {}.", names.join(", "))
    };

    quote! {
        #![doc = " Hit type builders for the measurement protocol."]
        #![doc = ""]
        #![doc = #listing]
    }
}
