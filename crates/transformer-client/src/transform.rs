//! Image transformations encoded into delivery paths
//!
//! A [`Transformations`] set is an ordered, loosely typed mapping as callers
//! usually hand it over (query strings, JSON, config files). Only the entries
//! that validate are turned into path segments; everything else is skipped
//! without an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between transformation segments in a delivery path
pub const SEGMENT_SEPARATOR: &str = "+";

/// Output formats the delivery service can render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpg,
    Gif,
}

impl ImageFormat {
    /// Parse a format name. Matching is exact and case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Format name as used in delivery paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validated transformation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transformation {
    Width(i64),
    Height(i64),
    Format(ImageFormat),
}

impl Transformation {
    /// Validate a raw `key => value` entry.
    ///
    /// Returns `None` for unknown keys and for values that do not validate.
    pub fn parse(key: &str, value: &Value) -> Option<Self> {
        match key {
            "width" => validated_dimension(value).map(Self::Width),
            "height" => validated_dimension(value).map(Self::Height),
            "format" => value.as_str().and_then(ImageFormat::parse).map(Self::Format),
            _ => None,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width(w) => write!(f, "w-{}", w),
            Self::Height(h) => write!(f, "h-{}", h),
            Self::Format(format) => write!(f, "f-{}", format),
        }
    }
}

/// Ordered set of requested transformations.
///
/// Iteration follows insertion order; inserting an existing key replaces its
/// value without moving it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transformations {
    entries: Map<String, Value>,
}

impl Transformations {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Add a raw entry, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Request a width in pixels
    pub fn width(self, width: u32) -> Self {
        self.with("width", width)
    }

    /// Request a height in pixels
    pub fn height(self, height: u32) -> Self {
        self.with("height", height)
    }

    /// Request an output format
    pub fn format(self, format: ImageFormat) -> Self {
        self.with("format", format.as_str())
    }

    /// Number of raw entries, valid or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were given
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the raw entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The entries that validate, in insertion order
    pub fn parsed(&self) -> Vec<Transformation> {
        self.iter()
            .filter_map(|(key, value)| Transformation::parse(key, value))
            .collect()
    }

    /// Path segment for these transformations, e.g. `w-150+h-100`
    pub fn segment(&self) -> String {
        transformation_segment(self)
    }
}

impl From<Map<String, Value>> for Transformations {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Transformations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Build the transformation part of a delivery path.
///
/// Valid entries are rendered in insertion order and joined with `+`. Returns
/// an empty string when nothing validates.
pub fn transformation_segment(transformations: &Transformations) -> String {
    transformations
        .parsed()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

// Zero validates as an integer but never produces a segment.
fn validated_dimension(value: &Value) -> Option<i64> {
    validated_integer(value).filter(|n| *n != 0)
}

/// Strict integer validation of a loosely typed value.
///
/// Accepts integers, integral floats, decimal strings (surrounding whitespace
/// allowed, optional sign, no leading zeros) and `true`.
pub fn validated_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(f) = n.as_f64() {
                // Larger floats print in exponent form and never validated.
                (f.fract() == 0.0 && f.abs() < 1e15).then_some(f as i64)
            } else {
                None
            }
        }
        Value::String(s) => parse_integer_str(s),
        Value::Bool(true) => Some(1),
        _ => None,
    }
}

fn parse_integer_str(s: &str) -> Option<i64> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0' || c == '\x0b');
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    trimmed.parse().ok()
}
