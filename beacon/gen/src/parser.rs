//! Index placeholder extraction from wire parameter keys.
//!
//! Some keys are templates: `pr<productIndex>id` only becomes a real key once
//! the caller supplies `productIndex`. A key is scanned once, left to right,
//! into literal and placeholder segments; every occurrence of a placeholder is
//! substituted on its own, including repeats of the same name.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `<word>` placeholders; the word is ASCII letters only.
    static ref PLACEHOLDER: Regex = Regex::new(r"<([A-Za-z]+)>").unwrap();
}

/// One piece of a parameter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that appears on the wire as written.
    Literal(String),
    /// An index variable name, substituted at request-build time.
    Index(String),
}

/// A parsed wire parameter key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamTemplate {
    segments: Vec<Segment>,
}

impl ParamTemplate {
    /// Splits a raw key into literal and index segments.
    ///
    /// ## Examples
    ///
    /// ```
    /// use beacon_gen::parser::{ParamTemplate, Segment};
    ///
    /// let template = ParamTemplate::parse("pr<productIndex>id");
    /// assert_eq!(
    ///     template.segments(),
    ///     &[
    ///         Segment::Literal("pr".to_string()),
    ///         Segment::Index("productIndex".to_string()),
    ///         Segment::Literal("id".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn parse(param: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for captures in PLACEHOLDER.captures_iter(param) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(param[last..whole.start()].to_string()));
            }
            segments.push(Segment::Index(name.as_str().to_string()));
            last = whole.end();
        }

        if last < param.len() {
            segments.push(Segment::Literal(param[last..].to_string()));
        }

        Self { segments }
    }

    /// Returns the segments in key order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true when the key has no placeholders.
    pub fn is_literal(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| matches!(s, Segment::Index(_)))
    }

    /// Index variable names in first-seen order, without duplicates.
    pub fn indices(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for segment in &self.segments {
            if let Segment::Index(name) = segment
                && !names.contains(name)
            {
                names.push(name.clone());
            }
        }
        names
    }

    /// Index references in key order, one per occurrence.
    pub fn references(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Index(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Builds a `format!` string: literals with braces escaped, `{}` per index.
    ///
    /// ## Examples
    ///
    /// ```
    /// use beacon_gen::parser::ParamTemplate;
    ///
    /// assert_eq!(ParamTemplate::parse("cd<dimensionIndex>").format_string(), "cd{}");
    /// ```
    pub fn format_string(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.replace('{', "{{").replace('}', "}}"),
                Segment::Index(_) => "{}".to_string(),
            })
            .collect()
    }

    /// Resolves the key with the given index values.
    ///
    /// Placeholders without a value are left as written.
    ///
    /// ## Examples
    ///
    /// ```
    /// use beacon_gen::parser::ParamTemplate;
    ///
    /// let template = ParamTemplate::parse("pr<foo>id");
    /// let key = template.resolve(|name| (name == "foo").then_some("X"));
    /// assert_eq!(key, "prXid");
    /// ```
    pub fn resolve<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.clone(),
                Segment::Index(name) => lookup(name)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("<{name}>")),
            })
            .collect()
    }
}
