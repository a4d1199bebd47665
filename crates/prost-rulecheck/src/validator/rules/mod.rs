pub(crate) mod number;

use prost_rulecheck_types::field_rules::Type;

use crate::config::ValidationConfig;
use crate::error::CoercionError;
use crate::value::RawValue;
use crate::violation::Violation;

use super::coerce::{NumericValue, coerce};
use super::evaluator;
use super::resolve::RuleKind;
use number::{Number, NumberRule, NumericRules, compile};

/// Compiled rules for one numeric representation.
pub(crate) struct CompiledNumber<T> {
    family: RuleKind,
    ignore_empty: bool,
    rules: Vec<NumberRule<T>>,
}

impl<T: Number> CompiledNumber<T> {
    fn new<R: NumericRules<Value = T>>(family: RuleKind, rules: &R) -> Self {
        Self {
            family,
            ignore_empty: rules.ignore_empty(),
            rules: compile(rules),
        }
    }

    fn check(&self, field: &str, value: T, cfg: &ValidationConfig) -> Vec<Violation> {
        if self.ignore_empty && value == T::ZERO {
            return Vec::new();
        }
        evaluator::run_rules(field, self.family.as_str(), value, &self.rules, cfg)
    }
}

/// A numeric rule arm compiled for its element type.
pub(crate) enum NumericRuleSet {
    U32(CompiledNumber<u32>),
    U64(CompiledNumber<u64>),
    I32(CompiledNumber<i32>),
    I64(CompiledNumber<i64>),
    F32(CompiledNumber<f32>),
    F64(CompiledNumber<f64>),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Self::U32($c) => $body,
            Self::U64($c) => $body,
            Self::I32($c) => $body,
            Self::I64($c) => $body,
            Self::F32($c) => $body,
            Self::F64($c) => $body,
        }
    };
}

impl NumericRuleSet {
    /// Compile a rule arm, or return `None` for non-numeric arms.
    pub fn from_arm(arm: &Type) -> Option<Self> {
        let set = match arm {
            Type::Float(r) => Self::F32(CompiledNumber::new(RuleKind::Float, r)),
            Type::Double(r) => Self::F64(CompiledNumber::new(RuleKind::Double, r)),
            Type::Int32(r) => Self::I32(CompiledNumber::new(RuleKind::Int32, r)),
            Type::Int64(r) => Self::I64(CompiledNumber::new(RuleKind::Int64, r)),
            Type::Uint32(r) => Self::U32(CompiledNumber::new(RuleKind::Uint32, r)),
            Type::Uint64(r) => Self::U64(CompiledNumber::new(RuleKind::Uint64, r)),
            Type::Sint32(r) => Self::I32(CompiledNumber::new(RuleKind::Sint32, r)),
            Type::Sint64(r) => Self::I64(CompiledNumber::new(RuleKind::Sint64, r)),
            Type::Fixed32(r) => Self::U32(CompiledNumber::new(RuleKind::Fixed32, r)),
            Type::Fixed64(r) => Self::U64(CompiledNumber::new(RuleKind::Fixed64, r)),
            Type::Sfixed32(r) => Self::I32(CompiledNumber::new(RuleKind::Sfixed32, r)),
            Type::Sfixed64(r) => Self::I64(CompiledNumber::new(RuleKind::Sfixed64, r)),
            Type::Bool(_)
            | Type::String(_)
            | Type::Bytes(_)
            | Type::Enum(_)
            | Type::Repeated(_)
            | Type::Map(_)
            | Type::Any(_)
            | Type::Duration(_)
            | Type::Timestamp(_) => return None,
        };
        Some(set)
    }

    /// The rule family the set was compiled from.
    pub fn family(&self) -> RuleKind {
        dispatch!(self, c => c.family)
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        dispatch!(self, c => c.rules.len())
    }

    fn ignore_empty(&self) -> bool {
        dispatch!(self, c => c.ignore_empty)
    }

    /// Coerce `raw` to the family's numeric type and run every compiled rule
    /// against it.
    pub fn check(
        &self,
        field: &str,
        raw: &RawValue,
        cfg: &ValidationConfig,
    ) -> Result<Vec<Violation>, CoercionError> {
        if self.ignore_empty() && raw.is_empty_text() {
            return Ok(Vec::new());
        }
        let violations = match (self, coerce(self.family(), raw)?) {
            (Self::U32(c), NumericValue::U32(v)) => c.check(field, v, cfg),
            (Self::U64(c), NumericValue::U64(v)) => c.check(field, v, cfg),
            (Self::I32(c), NumericValue::I32(v)) => c.check(field, v, cfg),
            (Self::I64(c), NumericValue::I64(v)) => c.check(field, v, cfg),
            (Self::F32(c), NumericValue::F32(v)) => c.check(field, v, cfg),
            (Self::F64(c), NumericValue::F64(v)) => c.check(field, v, cfg),
            // Families and representations are paired in `from_arm`.
            (set, value) => {
                return Err(CoercionError::UnsupportedKind(format!(
                    "{} for {value}",
                    set.family()
                )));
            }
        };
        Ok(violations)
    }
}
