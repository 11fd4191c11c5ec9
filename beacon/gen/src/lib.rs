//! Beacon code generator library.
//!
//! This crate generates type-safe Rust builders for a measurement protocol's
//! hit types from the protocol's HTML parameter reference. The generated code
//! includes:
//!
//! - A `Client` struct holding the parameters shared by every hit
//! - One builder struct per hit type, with a `new()` taking the required
//!   parameters and chaining setters for the optional ones
//! - A `HitType` trait serializing a builder into wire key/value pairs
//! - A `set_type()` dispatcher mapping each builder to its discriminator
//!
//! ## Modules
//!
//! - [`document`] - Parameter entry extraction from the HTML reference
//! - [`registry`] - Hit type enumeration and field membership
//! - [`normalize`] - Identifiers, value types and required flags
//! - [`parser`] - Index placeholder templates in wire keys
//! - [`finalize`] - Index pseudo-fields and the client dispatch table
//! - [`validation`] - Naming collision checks before rendering
//! - [`codegen`] - Code generation for individual components
//! - [`output`] - Final assembly, validation, and file writing
//! - [`pipeline`] - The stages above, end to end
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use beacon_gen::output::write_units;
//! use beacon_gen::pipeline::generate_from_html;
//!
//! let html = std::fs::read_to_string("generate/protocol-v1.html").unwrap();
//! let units = generate_from_html(&html).unwrap();
//!
//! // dry_run=false writes to disk
//! write_units(Path::new("hits"), &units, false).unwrap();
//! ```
//!
//! ## Generated Code Structure
//!
//! For a protocol with hit types `event` and `pageview`:
//!
//! ```text
//! // type-client.rs
//! pub trait HitType: Any { ... }
//! pub struct Client { pub use_tls: bool, pub http_client: Option<reqwest::Client>, ... }
//!
//! // type-event.rs
//! pub struct Event { category: String, action: String, action_set: bool, ... }
//!
//! impl Event {
//!     pub fn new(category: impl Into<String>) -> Self;
//!     pub fn action(&mut self, action: impl Into<String>) -> &mut Self;
//! }
//!
//! impl HitType for Event { ... }
//! ```

pub mod codegen;
pub mod document;
pub mod errors;
pub mod finalize;
pub mod model;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod validation;

#[cfg(test)]
mod test_utils;
