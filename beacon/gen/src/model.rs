//! The normalized protocol model.
//!
//! Each pipeline stage hands the next one a value from this module:
//!
//! ```text
//! Extraction (raw rows) -> Registry (membership) -> Vec<Field> -> Vec<HitType>
//! ```

use std::fmt;

use crate::naming::snake_case;
use crate::parser::ParamTemplate;

/// Name of the synthetic hit type holding the parameters shared by all hits.
pub const CLIENT_HIT_TYPE: &str = "client";

/// Hit type tag the document uses for parameters shared by all hits.
pub const ALL_HIT_TYPES: &str = "all";

/// Primitive a parameter value is carried as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `text`
    String,
    /// `boolean`
    Boolean,
    /// `integer`, carried as `i64`
    Integer,
    /// `currency`, carried as `f64`
    Float,
}

impl ValueType {
    /// Maps a declared kind from the document to a value type.
    ///
    /// Returns `None` for kinds the protocol does not define.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "text" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "currency" => Some(Self::Float),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "String",
            Self::Boolean => "bool",
            Self::Integer => "i64",
            Self::Float => "f64",
        };
        f.write_str(name)
    }
}

/// One parameter entry exactly as the document states it (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawField {
    /// Display name, e.g. "Event Action".
    pub name: String,
    /// Prose description.
    pub docs: String,
    /// Wire key, possibly with `<index>` placeholders.
    pub param: String,
    /// Declared kind: text, integer, boolean or currency.
    pub kind: String,
    pub default: String,
    pub max_len: String,
    pub examples: String,
    /// False when the indicator block says "Optional".
    pub required: bool,
    /// Hit type names (or `all`) this entry applies to.
    pub hit_types: Vec<String>,
}

/// Everything the document contributes to a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Every parameter entry except the "Hit type" one, in document order.
    pub fields: Vec<RawField>,
    /// Description of the "Hit type" entry, listing all hit type names.
    pub hit_type_docs: String,
    /// Wire key of the "Hit type" entry, when the document gives one.
    pub discriminator: Option<String>,
}

/// A normalized protocol parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Export-cased identifier; lowercase-initial means internal.
    pub name: String,
    /// Lowercase-initial identifier for members and arguments.
    pub private_name: String,
    /// Wrapped description, one entry per comment line.
    pub docs: Vec<String>,
    /// Wire key as written; empty for synthesized index fields.
    pub param: String,
    pub param_template: ParamTemplate,
    pub value_type: ValueType,
    pub default: String,
    pub max_len: String,
    pub examples: String,
    pub required: bool,
    pub hit_types: Vec<String>,
    /// Index variables `param` references, first-seen order.
    pub indices: Vec<String>,
}

impl Field {
    /// Returns true when the field is part of the public builder API.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    /// Returns true when the field is written to the wire.
    pub fn has_param(&self) -> bool {
        !self.param.is_empty()
    }

    /// Snake case name of the generated struct member.
    pub fn member_name(&self) -> String {
        snake_case(&self.private_name)
    }

    /// Snake case name of the generated setter.
    pub fn setter_name(&self) -> String {
        snake_case(&self.name)
    }

    /// Name of the flag recording that an optional field was set.
    pub fn set_flag_name(&self) -> String {
        format!("{}_set", self.member_name())
    }
}

/// A finalized hit type, ready for emission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitType {
    /// Canonical lowercase name.
    pub name: String,
    /// Export-cased name of the generated builder.
    pub struct_name: String,
    /// Document fields in declaration order, then synthesized index fields.
    pub fields: Vec<Field>,
    /// Sorted index variable names needed by the fields.
    pub indices: Vec<String>,
    /// Sorted names of every concrete hit type (client only).
    pub hit_type_ids: Vec<String>,
    /// Wire key of the discriminator (client only).
    pub discriminator: Option<String>,
}

impl HitType {
    /// Returns true for the synthetic common type.
    pub fn is_client(&self) -> bool {
        self.name == CLIENT_HIT_TYPE
    }

    /// Output filename of this hit type's unit.
    pub fn filename(&self) -> String {
        format!("type-{}.rs", self.name)
    }
}
