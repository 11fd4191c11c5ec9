//! Builder struct generation for hit types.
//!
//! Every hit type becomes a struct with one private member per field. Optional
//! fields carry a `<member>_set` flag so an unset field can be told apart from
//! one set to its zero value:
//!
//! ```ignore
//! #[derive(Debug, Clone, Default)]
//! pub struct Event {
//!     category: String,
//!     value: i64,
//!     value_set: bool,
//! }
//!
//! impl Event {
//!     pub fn new(category: impl Into<String>) -> Self { ... }
//!     pub fn value(&mut self, value: i64) -> &mut Self { ... }
//!     pub fn copy(&self) -> Self { ... }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::model::{Field, HitType, ValueType};
use crate::naming::rust_ident;
use crate::validation::DISCRIMINATOR_MEMBER;

/// Generates the struct definition for a hit type.
///
/// The `client` struct additionally gets the public transport members and,
/// when the protocol has a discriminator, the internal `hit_type` member.
pub fn generate_struct(hit: &HitType) -> TokenStream {
    let struct_name = format_ident!("{}", hit.struct_name);
    let doc_lines = struct_doc_lines(hit);
    let members = hit.fields.iter().map(generate_members);

    let client_members = if hit.is_client() {
        let discriminator = hit.discriminator.as_ref().map(|_| {
            let member = format_ident!("{}", DISCRIMINATOR_MEMBER);
            quote! {
                #member: String,
            }
        });
        quote! {
            /// Sends hits over HTTPS when true.
            pub use_tls: bool,
            /// HTTP client used to send hits; a default client when `None`.
            pub http_client: Option<reqwest::Client>,
            #discriminator
        }
    } else {
        TokenStream::new()
    };

    quote! {
        #(#[doc = #doc_lines])*
        #[derive(Debug, Clone, Default)]
        pub struct #struct_name {
            #client_members
            #(#members)*
        }
    }
}

/// Generates the member (and set flag, when optional) for one field.
fn generate_members(field: &Field) -> TokenStream {
    let member = rust_ident(&field.member_name());
    let ty = member_type(field.value_type);
    let docs = field_doc_lines(field);

    let flag = (!field.required).then(|| {
        let flag = rust_ident(&field.set_flag_name());
        quote! { #flag: bool, }
    });

    quote! {
        #(#[doc = #docs])*
        #member: #ty,
        #flag
    }
}

/// Generates the inherent impl block: constructor, setters, `copy` and any
/// extra methods the caller supplies.
pub fn generate_builder_impl(hit: &HitType, extra: TokenStream) -> TokenStream {
    let struct_name = format_ident!("{}", hit.struct_name);
    let constructor = if hit.is_client() {
        TokenStream::new()
    } else {
        generate_constructor(hit)
    };
    let setters = hit
        .fields
        .iter()
        .filter(|f| has_setter(hit, f))
        .map(generate_setter);
    let copy = generate_copy(hit);

    quote! {
        impl #struct_name {
            #constructor
            #(#setters)*
            #copy
            #extra
        }
    }
}

/// Generates `new`, taking every required field in declaration order.
pub fn generate_constructor(hit: &HitType) -> TokenStream {
    let required: Vec<&Field> = hit.fields.iter().filter(|f| f.required).collect();
    let doc = format!(
        " Creates a `{}` hit from its required parameters.",
        hit.struct_name
    );

    let params = required.iter().map(|f| {
        let member = rust_ident(&f.member_name());
        let ty = param_type(f.value_type);
        quote! { #member: #ty }
    });

    let inits: Vec<TokenStream> = required
        .iter()
        .map(|f| {
            let member = rust_ident(&f.member_name());
            match f.value_type {
                ValueType::String => quote! { #member: #member.into() },
                _ => quote! { #member },
            }
        })
        .collect();

    // Spell out `..Self::default()` only when some member is left to fill
    let body = if inits.is_empty() {
        quote! { Self::default() }
    } else if required.len() == hit.fields.len() {
        quote! { Self { #(#inits),* } }
    } else {
        quote! { Self { #(#inits,)* ..Self::default() } }
    };

    quote! {
        #[doc = #doc]
        pub fn new(#(#params),*) -> Self {
            #body
        }
    }
}

/// Returns true when `field` gets a setter on `hit`.
///
/// The client has no constructor, so its required fields are set through
/// crate-visible setters instead.
pub fn has_setter(hit: &HitType, field: &Field) -> bool {
    !field.required || hit.is_client()
}

/// Generates the chaining setter of a field.
///
/// Setters of internal and required fields are crate-visible only. Required
/// fields are always serialized, so they have no set flag to raise.
pub fn generate_setter(field: &Field) -> TokenStream {
    let setter = rust_ident(&field.setter_name());
    let member = rust_ident(&field.member_name());
    let ty = param_type(field.value_type);
    let docs = field_doc_lines(field);

    let mark_set = (!field.required).then(|| {
        let flag = rust_ident(&field.set_flag_name());
        quote! { self.#flag = true; }
    });
    let assign = match field.value_type {
        ValueType::String => quote! { self.#member = #member.into(); },
        _ => quote! { self.#member = #member; },
    };
    let visibility = if field.is_exported() && !field.required {
        quote! { pub }
    } else {
        quote! { pub(crate) }
    };

    quote! {
        #(#[doc = #docs])*
        #visibility fn #setter(&mut self, #member: #ty) -> &mut Self {
            #assign
            #mark_set
            self
        }
    }
}

/// Generates `copy`, a shallow copy with identical field values.
pub fn generate_copy(hit: &HitType) -> TokenStream {
    let doc = format!(" Returns a copy of this `{}` with identical values.", hit.struct_name);
    quote! {
        #[doc = #doc]
        pub fn copy(&self) -> Self {
            self.clone()
        }
    }
}

/// Rust type of a stored member.
fn member_type(value_type: ValueType) -> TokenStream {
    match value_type {
        ValueType::String => quote! { String },
        ValueType::Boolean => quote! { bool },
        ValueType::Integer => quote! { i64 },
        ValueType::Float => quote! { f64 },
    }
}

/// Rust type of a constructor or setter argument.
fn param_type(value_type: ValueType) -> TokenStream {
    match value_type {
        ValueType::String => quote! { impl Into<String> },
        other => member_type(other),
    }
}

fn struct_doc_lines(hit: &HitType) -> Vec<String> {
    if hit.is_client() {
        vec![
            format!(" {} holds the parameters shared by every hit type.", hit.struct_name),
            String::new(),
            " Concrete hits are sent through it; it fills in the discriminator itself."
                .to_string(),
        ]
    } else {
        vec![format!(" {} builds a `{}` hit.", hit.struct_name, hit.name)]
    }
}

fn field_doc_lines(field: &Field) -> Vec<String> {
    field.docs.iter().map(|line| format!(" {line}")).collect()
}
