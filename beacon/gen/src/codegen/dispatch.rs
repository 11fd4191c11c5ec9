//! The `HitType` capability and the dispatch from builders to discriminators.
//!
//! Concrete builders implement `HitType`. When a hit is sent, the client asks
//! `set_type` which builder it got and stores that hit type's wire name:
//!
//! ```ignore
//! pub fn set_type(&mut self, hit: &dyn HitType) {
//!     let id = Any::type_id(hit.as_any());
//!     if id == TypeId::of::<Event>() {
//!         self.hit_type = "event".to_string();
//!     } else if id == TypeId::of::<Pageview>() {
//!         self.hit_type = "pageview".to_string();
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::codegen::params::push_statements;
use crate::model::HitType;
use crate::naming::export_name;
use crate::validation::DISCRIMINATOR_MEMBER;

/// Generates the `HitType` trait every concrete builder implements.
pub fn generate_hit_type_trait() -> TokenStream {
    quote! {
        /// A hit that can be sent through a [`Client`].
        pub trait HitType: Any {
            /// Appends this hit's parameters to `v`.
            fn add_fields(&self, v: &mut Vec<(String, String)>);

            /// Returns `self` for type based dispatch.
            fn as_any(&self) -> &dyn Any;
        }
    }
}

/// Generates `impl HitType` for a concrete builder.
pub fn generate_hit_type_impl(hit: &HitType) -> TokenStream {
    let struct_name = format_ident!("{}", hit.struct_name);
    let pushes = push_statements(&hit.fields);
    let buffer = buffer_ident(pushes.is_empty());

    quote! {
        impl HitType for #struct_name {
            fn add_fields(&self, #buffer: &mut Vec<(String, String)>) {
                #(#pushes)*
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    }
}

/// Generates the client's inherent `add_fields`.
///
/// The discriminator goes first, followed by the shared fields.
pub fn generate_client_add_fields(hit: &HitType) -> TokenStream {
    let discriminator = hit.discriminator.as_ref().map(|key| {
        let member = format_ident!("{}", DISCRIMINATOR_MEMBER);
        quote! { v.push((#key.to_string(), self.#member.clone())); }
    });
    let pushes = push_statements(&hit.fields);
    let buffer = buffer_ident(discriminator.is_none() && pushes.is_empty());

    quote! {
        /// Appends the shared parameters and the discriminator to `v`.
        pub(crate) fn add_fields(&self, #buffer: &mut Vec<(String, String)>) {
            #discriminator
            #(#pushes)*
        }
    }
}

/// Generates `set_type`, mapping each concrete builder to its wire name.
///
/// Returns nothing when the protocol has no discriminator to store.
pub fn generate_set_type(hit: &HitType) -> TokenStream {
    if hit.discriminator.is_none() {
        return TokenStream::new();
    }

    let member = format_ident!("{}", DISCRIMINATOR_MEMBER);
    let mut branches = TokenStream::new();
    for (position, id) in hit.hit_type_ids.iter().enumerate() {
        let struct_name = format_ident!("{}", export_name(id));
        if position > 0 {
            branches.extend(quote! { else });
        }
        branches.extend(quote! {
            if id == TypeId::of::<#struct_name>() {
                self.#member = #id.to_string();
            }
        });
    }

    let body = if hit.hit_type_ids.is_empty() {
        quote! { let _ = hit; }
    } else {
        quote! {
            let id = Any::type_id(hit.as_any());
            #branches
        }
    };

    quote! {
        /// Records which hit type `hit` is, for the discriminator parameter.
        pub fn set_type(&mut self, hit: &dyn HitType) {
            #body
        }
    }
}

/// Imports the unit defining a builder needs.
pub fn generate_imports(hit: &HitType) -> TokenStream {
    if !hit.is_client() {
        return quote! {
            use std::any::Any;

            use super::HitType;
        };
    }

    let dispatches = hit.discriminator.is_some() && !hit.hit_type_ids.is_empty();
    if !dispatches {
        return quote! { use std::any::Any; };
    }

    let concrete = hit.hit_type_ids.iter().map(|id| format_ident!("{}", export_name(id)));
    quote! {
        use std::any::{Any, TypeId};

        use super::{#(#concrete),*};
    }
}

/// `v`, or `_v` when nothing is pushed.
fn buffer_ident(unused: bool) -> proc_macro2::Ident {
    if unused {
        format_ident!("_v")
    } else {
        format_ident!("v")
    }
}
