//! Error types for the beacon generator.

use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Every variant is fatal: the run stops at the first one and nothing is
/// written.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The parameter reference document did not have the expected shape
    #[error("Failed to parse parameter reference: {0}")]
    ParseError(String),

    /// The document never described the "Hit type" parameter
    #[error("Parameter reference has no 'Hit type' entry; cannot enumerate hit types")]
    MissingHitTypeEntry,

    /// An item of the hit type enumeration did not hold exactly one quoted name
    #[error("Hit type enumeration item '{item}' should contain exactly one quoted name")]
    InvalidEnumeration {
        /// The offending comma-separated item.
        item: String,
    },

    /// A parameter belongs to a hit type the enumeration does not declare
    #[error("Unknown hit type '{name}' referenced by parameter '{param}'")]
    UnknownHitType {
        /// The undeclared hit type name.
        name: String,
        /// Wire key of the parameter that referenced it.
        param: String,
    },

    /// A parameter declared a value kind outside text/integer/boolean/currency
    #[error("Unknown value kind '{kind}' on parameter '{param}'")]
    UnknownValueKind {
        /// The declared kind as written in the document.
        kind: String,
        /// Wire key of the parameter.
        param: String,
    },

    /// A display name produced no usable identifier
    #[error("Parameter name '{name}' does not yield an identifier")]
    InvalidFieldName {
        /// The raw display name.
        name: String,
    },

    /// Two generated names clash inside one hit type.
    ///
    /// This occurs when two parameters derive the same member name, or when a
    /// setter would shadow one of the generated methods (`new`, `copy`, ...).
    #[error("Naming collision in hit type '{hit_type}' on '{member}': {reason}")]
    NamingCollision {
        /// The hit type whose unit would not compile.
        hit_type: String,
        /// The clashing member or method name.
        member: String,
        /// Explanation of the clash.
        reason: String,
    },

    /// A rendered unit is not valid Rust.
    ///
    /// `listing` holds the rendered text with line numbers for diagnosis.
    #[error("Template for '{unit}' produced invalid code: {message}\n{listing}")]
    Template {
        /// The output unit being rendered.
        unit: String,
        /// Numbered listing of the rejected code.
        listing: String,
        /// Parser message.
        message: String,
    },

    /// Failed to read the input document
    #[error("Failed to read input file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
