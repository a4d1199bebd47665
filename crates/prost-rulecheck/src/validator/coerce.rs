use std::fmt;

use crate::error::CoercionError;
use crate::value::RawValue;

use super::resolve::{ResolvedRules, RuleKind};
use super::rules::number::Number;

/// The numeric representation a rule kind is validated in.
///
/// The twelve protobuf integer encodings collapse onto four widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NumericKind {
    U32,
    U64,
    I32,
    I64,
    F32,
    F64,
}

impl NumericKind {
    /// Returns the numeric representation for a rule kind, or `None` when the
    /// kind has no converter.
    #[must_use]
    pub fn of(kind: RuleKind) -> Option<Self> {
        match kind {
            RuleKind::Uint32 | RuleKind::Fixed32 => Some(Self::U32),
            RuleKind::Uint64 | RuleKind::Fixed64 => Some(Self::U64),
            RuleKind::Int32 | RuleKind::Sint32 | RuleKind::Sfixed32 => Some(Self::I32),
            RuleKind::Int64 | RuleKind::Sint64 | RuleKind::Sfixed64 => Some(Self::I64),
            RuleKind::Float => Some(Self::F32),
            RuleKind::Double => Some(Self::F64),
            _ => None,
        }
    }
}

/// A raw value converted to its rule kind's numeric representation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub enum NumericValue {
    U32(u32),
    U64(u64),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Convert a raw value into the numeric type expected for `kind`.
///
/// # Errors
///
/// Returns [`CoercionError::UnsupportedKind`] when `kind` has no numeric
/// converter, and [`CoercionError::Conversion`] when the value does not parse
/// or does not fit the target width.
pub fn coerce(kind: RuleKind, raw: &RawValue) -> Result<NumericValue, CoercionError> {
    let Some(numeric) = NumericKind::of(kind) else {
        return Err(CoercionError::UnsupportedKind(kind.to_string()));
    };
    Ok(match numeric {
        NumericKind::U32 => NumericValue::U32(u32::from_raw(raw)?),
        NumericKind::U64 => NumericValue::U64(u64::from_raw(raw)?),
        NumericKind::I32 => NumericValue::I32(i32::from_raw(raw)?),
        NumericKind::I64 => NumericValue::I64(i64::from_raw(raw)?),
        NumericKind::F32 => NumericValue::F32(f32::from_raw(raw)?),
        NumericKind::F64 => NumericValue::F64(f64::from_raw(raw)?),
    })
}

/// Convert a raw value for a resolved field, coercing wrapper fields through
/// their wrapped scalar kind.
///
/// # Errors
///
/// Same as [`coerce`] applied to [`ResolvedRules::effective_kind`].
pub fn coerce_resolved(
    resolved: &ResolvedRules<'_>,
    raw: &RawValue,
) -> Result<NumericValue, CoercionError> {
    coerce(resolved.effective_kind(), raw)
}
