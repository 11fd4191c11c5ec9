//! Code generation modules for beacon-gen.
//!
//! This module contains generators that produce Rust source code from the
//! finalized hit type model. Each submodule handles one component of a
//! generated unit.
//!
//! ## Submodules
//!
//! - [`builder_struct`] - The builder struct, its constructor, setters and `copy`
//! - [`params`] - Serialization of fields into wire key/value pairs
//! - [`dispatch`] - The `HitType` trait and the client's `set_type` dispatcher
//! - [`module_docs`] - Module-level documentation for each unit
//!
//! ## Code Generation Flow
//!
//! 1. Each hit type gets a struct via [`generate_struct`]
//! 2. Its inherent methods are generated via [`generate_builder_impl`]
//! 3. Concrete types implement `HitType` via [`generate_hit_type_impl`]
//! 4. The client gets the trait, [`generate_set_type`] and its own `add_fields`
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod builder_struct;
pub mod dispatch;
pub mod module_docs;
pub mod params;

pub use builder_struct::{generate_builder_impl, generate_struct};
pub use dispatch::{
    generate_client_add_fields, generate_hit_type_impl, generate_hit_type_trait,
    generate_imports, generate_set_type,
};
pub use module_docs::{UnitDocBuilder, mod_rs_docs};
