use crate::config::ValidationConfig;
use crate::error::CoercionError;
use crate::field::Field;
use crate::result::ValidationResult;
use crate::value::Input;
use crate::violation::{FailureKind, Violation};

use super::super::resolve::{RuleKind, resolve};
use super::super::rules::NumericRuleSet;

/// What the rule stage does once a field's rules are resolved.
pub(crate) enum RulePlan {
    /// No validation required.
    Nothing,
    /// The descriptor carries a rule shape outside the known set, or an arm
    /// that does not fit the field type. Holds the failure message.
    UnknownRule(String),
    /// The resolved kind has no numeric validators.
    Unsupported(RuleKind),
    /// Coerce and run compiled numeric rules.
    Numeric(NumericRuleSet),
}

/// Evaluator for a single field: required check, then resolution and
/// coercion, then compiled rules. Each stage short-circuits the next.
pub(crate) struct FieldEval {
    /// Key of the field in the input record.
    pub name: String,

    /// Whether the field must be present, from its label or `message.required`.
    pub required: bool,

    /// Whether `message.skip` disables rule checks for this field.
    pub skip: bool,

    pub plan: RulePlan,
}

impl FieldEval {
    pub fn build(field: &Field) -> Self {
        let resolved = resolve(field.field_type(), field.rules());
        let message_rules = resolved.message_rules;

        let plan = match resolved.kind {
            RuleKind::Error => RulePlan::UnknownRule(
                match (resolved.mismatch, field.rules().and_then(|d| d.unrecognized)) {
                    (Some(mismatch), _) => format!("{mismatch} for field {}", field.name()),
                    (None, Some(number)) => format!(
                        "unknown rule type (field number {number}) for field {}",
                        field.name()
                    ),
                    (None, None) => format!("unknown rule type for field {}", field.name()),
                },
            ),
            RuleKind::None => RulePlan::Nothing,
            _ => match resolved.arm().and_then(NumericRuleSet::from_arm) {
                Some(set) => RulePlan::Numeric(set),
                None => RulePlan::Unsupported(resolved.effective_kind()),
            },
        };

        Self {
            name: field.name().to_string(),
            required: field.is_required()
                || message_rules.is_some_and(|rules| rules.required.unwrap_or(false)),
            skip: message_rules.is_some_and(|rules| rules.skip.unwrap_or(false)),
            plan,
        }
    }

    /// Number of compiled rules, for diagnostics.
    pub fn rule_count(&self) -> usize {
        match &self.plan {
            RulePlan::Numeric(set) => set.len(),
            _ => 0,
        }
    }

    pub fn evaluate<I: Input + ?Sized>(
        &self,
        input: &I,
        cfg: &ValidationConfig,
    ) -> ValidationResult {
        let raw = input.raw_value(&self.name);

        if self.required && raw.is_none() {
            return self.fail(
                FailureKind::MissingRequiredField,
                "required",
                format!("field {} is required", self.name),
            );
        }

        let (set, raw) = match (&self.plan, raw) {
            (RulePlan::UnknownRule(message), _) => {
                return self.fail(FailureKind::UnknownRuleType, "unknown", message.clone());
            }
            (RulePlan::Nothing, _) | (_, None) => return ValidationResult::passed(&self.name),
            _ if self.skip => return ValidationResult::passed(&self.name),
            (RulePlan::Unsupported(kind), Some(_)) => {
                return self.fail(
                    FailureKind::UnsupportedType,
                    kind.as_str(),
                    format!("unsupported type {kind} for field {}", self.name),
                );
            }
            (RulePlan::Numeric(set), Some(raw)) => (set, raw),
        };

        match set.check(&self.name, raw, cfg) {
            Err(CoercionError::UnsupportedKind(kind)) => self.fail(
                FailureKind::UnsupportedType,
                set.family().as_str(),
                format!("unsupported type {kind} for field {}", self.name),
            ),
            Err(err) => self.fail(
                FailureKind::ConversionError,
                format!("{}.type", set.family()),
                err.to_string(),
            ),
            Ok(violations) if violations.is_empty() => ValidationResult::passed(&self.name),
            Ok(violations) => ValidationResult::failed(&self.name, violations),
        }
    }

    fn fail(
        &self,
        kind: FailureKind,
        rule_id: impl Into<String>,
        message: String,
    ) -> ValidationResult {
        ValidationResult::failed(
            &self.name,
            vec![Violation::new(&self.name, kind, rule_id, message)],
        )
    }
}
