//! Identifier casing helpers.
//!
//! Parameter display names arrive as prose ("Event Action", "Client ID") and
//! leave as Rust identifiers. The model keeps names in export case
//! (`EventAction`) and private case (`eventAction`); the emitter converts
//! those to snake case members (`event_action`) at the last moment.
//!
//! ## Examples
//!
//! ```
//! use beacon_gen::naming::{export_name, snake_case};
//!
//! assert_eq!(export_name("event action"), "EventAction");
//! assert_eq!(snake_case("ClientID"), "client_id");
//! ```

use proc_macro2::{Ident, Span};

/// Words Rust reserves; members with these names are emitted as raw identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers either.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Uppercases the first character of `s`.
pub fn first_rune_to_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character of `s`.
pub fn first_rune_to_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Export-cases a space separated phrase.
///
/// Splits on single spaces, uppercases the first letter of each word and
/// concatenates. The rest of each word is left untouched, so acronyms survive
/// (`"client ID"` becomes `"ClientID"`).
pub fn export_name(s: &str) -> String {
    s.split(' ').map(first_rune_to_upper).collect()
}

/// Converts an export- or private-cased identifier to snake case.
pub fn snake_case(s: &str) -> String {
    split_camel_case(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Builds a Rust identifier, escaping keywords.
pub fn rust_ident(name: &str) -> Ident {
    if NON_RAW_KEYWORDS.contains(&name) {
        Ident::new(&format!("{name}_"), Span::call_site())
    } else if RUST_KEYWORDS.contains(&name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// Splits a CamelCase string into individual words.
///
/// Handles various CamelCase patterns:
/// - "EventAction" -> ["Event", "Action"]
/// - "ClientID" -> ["Client", "ID"]
/// - "IPOverride" -> ["IP", "Override"]
/// - "hitType" -> ["hit", "Type"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;

        // Split before uppercase that follows lowercase: "hitType" -> "hit", "Type"
        // Split before the last capital of an acronym: "IPOverride" -> "IP", "Override"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if offset > word_start {
                words.push(&s[word_start..offset]);
            }
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}
