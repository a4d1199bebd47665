use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// An untyped field value supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Textual form, e.g. `"30"` or `"12.5"`.
    Text(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating-point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl RawValue {
    /// Returns true for text that is empty or only whitespace.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A record of raw values keyed by field name.
pub trait Input {
    /// Returns the raw value for `name`, if the record has one.
    fn raw_value(&self, name: &str) -> Option<&RawValue>;
}

impl<S: BuildHasher> Input for HashMap<String, RawValue, S> {
    fn raw_value(&self, name: &str) -> Option<&RawValue> {
        self.get(name)
    }
}

impl Input for BTreeMap<String, RawValue> {
    fn raw_value(&self, name: &str) -> Option<&RawValue> {
        self.get(name)
    }
}

impl<I: Input + ?Sized> Input for &I {
    fn raw_value(&self, name: &str) -> Option<&RawValue> {
        (**self).raw_value(name)
    }
}
