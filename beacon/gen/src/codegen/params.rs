//! Serialization of builder fields into wire parameters.
//!
//! Every field with a wire key contributes one `v.push((key, value))`
//! statement to the generated `add_fields`. Required fields push
//! unconditionally; optional fields push only once their setter ran:
//!
//! ```ignore
//! v.push(("ec".to_string(), self.category.clone()));
//! if self.value_set {
//!     v.push(("ev".to_string(), self.value.to_string()));
//! }
//! if self.custom_dimension_set {
//!     v.push((format!("cd{}", self.dimension_index), self.custom_dimension.clone()));
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use crate::model::{Field, ValueType};
use crate::naming::{rust_ident, snake_case};
use crate::parser::ParamTemplate;

/// Generates the expression that evaluates to a field's wire key.
///
/// A key without placeholders becomes a string literal. A templated key
/// becomes a `format!` call that splices in the index members, one argument
/// per placeholder occurrence.
pub fn key_expr(template: &ParamTemplate) -> TokenStream {
    let format_string = template.format_string();

    if template.is_literal() {
        // Literal keys never contain `{}`; unescape what format_string escaped
        let literal = format_string.replace("{{", "{").replace("}}", "}");
        return quote! { #literal.to_string() };
    }

    let args = template
        .references()
        .into_iter()
        .map(|index| rust_ident(&snake_case(index)));

    quote! { format!(#format_string, #(self.#args),*) }
}

/// Generates the expression converting a field's member to its wire string.
pub fn value_expr(field: &Field) -> TokenStream {
    let member = rust_ident(&field.member_name());
    match field.value_type {
        ValueType::String => quote! { self.#member.clone() },
        ValueType::Integer | ValueType::Float => quote! { self.#member.to_string() },
        ValueType::Boolean => quote! { if self.#member { "1" } else { "0" }.to_string() },
    }
}

/// Generates the push statement for one field, guarded when it is optional.
pub fn push_statement(field: &Field) -> TokenStream {
    let key = key_expr(&field.param_template);
    let value = value_expr(field);
    let push = quote! { v.push((#key, #value)); };

    if field.required {
        push
    } else {
        let flag = rust_ident(&field.set_flag_name());
        quote! {
            if self.#flag {
                #push
            }
        }
    }
}

/// Generates the push statements of every field that has a wire key.
pub fn push_statements(fields: &[Field]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter(|f| f.has_param())
        .map(push_statement)
        .collect()
}
