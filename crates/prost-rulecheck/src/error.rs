use std::fmt;

use crate::violation::Violation;

/// Top-level error type returned by record validation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// One or more fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A field's constraint option could not be read.
    #[error(transparent)]
    Compilation(#[from] CompilationError),
}

/// Returned when one or more fields fail validation.
#[derive(Debug, thiserror::Error)]
#[error("field validation failed: {}", join(.violations))]
pub struct ValidationError {
    /// Every violation found, in field order then evaluation order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Returned when a field's `(validate.rules)` option cannot be decoded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("compilation error: {cause}")]
pub struct CompilationError {
    /// Description of why the rules could not be read.
    pub cause: String,
}

/// Returned when a raw value cannot be coerced for a rule kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CoercionError {
    /// The rule kind has no numeric converter.
    #[error("unsupported type: {0}")]
    UnsupportedKind(String),

    /// The raw value does not parse as the target type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// A raw value that could not be converted to a numeric type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot convert {value} to {target}: {reason}")]
pub struct ConversionError {
    /// The offending value, as displayed to users.
    pub value: String,
    /// The target numeric type.
    pub target: &'static str,
    /// Why conversion failed.
    pub reason: String,
}

impl ConversionError {
    pub(crate) fn new(
        value: impl fmt::Display,
        target: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            value: value.to_string(),
            target,
            reason: reason.into(),
        }
    }
}
