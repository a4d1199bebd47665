use std::sync::LazyLock;

use prost_reflect::MessageDescriptor;

use crate::config::{ValidationConfig, ValidatorOption};
use crate::error::{CompilationError, Error, ValidationError};
use crate::field::Field;
use crate::result::ValidationResult;
use crate::value::Input;

mod builder;
pub(crate) mod coerce;
mod evaluator;
pub(crate) mod resolve;
pub(crate) mod rules;

use builder::Builder;

pub use evaluator::run;

/// Thread-safe validator for individual fields.
///
/// Checks raw field values against constraints read from
/// `(validate.rules)` field options. Compiled rules are cached by the
/// field's full name and reused while the field is unchanged.
pub struct Validator {
    builder: Builder,
    config: ValidationConfig,
}

impl Validator {
    /// Create a new `Validator` with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: Builder::new(),
            config: ValidationConfig::default(),
        }
    }

    /// Create a new `Validator` with the given options.
    #[must_use]
    pub fn with_options(options: &[ValidatorOption]) -> Self {
        let mut fail_fast = false;
        let mut cache = true;

        for opt in options {
            match opt {
                ValidatorOption::FailFast => fail_fast = true,
                ValidatorOption::DisableCache => cache = false,
            }
        }

        Self {
            builder: Builder::with_cache(cache),
            config: ValidationConfig { fail_fast },
        }
    }

    /// Check one field of an input record.
    ///
    /// Runs the presence check, then rule resolution and value coercion, then
    /// every compiled rule. The first failing stage ends the check; within
    /// the rule stage every rule is run unless `FailFast` is set.
    #[must_use]
    pub fn check_field<I: Input + ?Sized>(&self, field: &Field, input: &I) -> ValidationResult {
        let eval = self.builder.load_or_build(field);
        let result = eval.evaluate(input, &self.config);
        if let Some(kind) = result.failure_kind() {
            tracing::trace!(
                field = field.full_name(),
                ?kind,
                violations = result.violations().len(),
                "field check failed"
            );
        }
        result
    }

    /// Check every field in `fields`, in order. A failing field never stops
    /// the remaining fields from being checked.
    #[must_use]
    pub fn check_fields<I: Input + ?Sized>(
        &self,
        fields: &[Field],
        input: &I,
    ) -> Vec<ValidationResult> {
        fields
            .iter()
            .map(|field| self.check_field(field, input))
            .collect()
    }

    /// Check every field in `fields` and fold the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` with the violations of every failing field.
    pub fn validate_fields<I: Input + ?Sized>(
        &self,
        fields: &[Field],
        input: &I,
    ) -> Result<(), Error> {
        fold(self.check_fields(fields, input))
    }

    /// Check every field of a message type, reading each field's rules from
    /// its descriptor options.
    ///
    /// # Errors
    ///
    /// Returns a `CompilationError` if a field's rules option is malformed.
    pub fn check_message<I: Input + ?Sized>(
        &self,
        desc: &MessageDescriptor,
        input: &I,
    ) -> Result<Vec<ValidationResult>, CompilationError> {
        let fields = desc
            .fields()
            .map(|field| Field::from_descriptor(&field))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.check_fields(&fields, input))
    }

    /// Check every field of a message type and fold the outcome into a
    /// `Result`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Compilation` if a field's rules option is malformed,
    /// or `Error::Validation` with the violations of every failing field.
    pub fn validate_message<I: Input + ?Sized>(
        &self,
        desc: &MessageDescriptor,
        input: &I,
    ) -> Result<(), Error> {
        fold(self.check_message(desc, input)?)
    }
}

fn fold(results: Vec<ValidationResult>) -> Result<(), Error> {
    let violations: Vec<_> = results
        .into_iter()
        .flat_map(ValidationResult::into_violations)
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations).into())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Check one field using a global `Validator` instance.
///
/// This is a convenience function that uses a shared, lazily-initialized
/// validator. For repeated checks of many fields, prefer a dedicated
/// `Validator` instance.
#[must_use]
pub fn check_field<I: Input + ?Sized>(field: &Field, input: &I) -> ValidationResult {
    GLOBAL_VALIDATOR.check_field(field, input)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use pretty_assertions::assert_eq;
    use prost_rulecheck_types::field_rules::Type;
    use prost_rulecheck_types::{
        ConstraintDescriptor, DoubleRules, FieldRules, FloatRules, Int32Rules, Int64Rules,
        UInt64Rules,
    };

    use super::*;
    use crate::field::tests::{age_rules, person_pool};
    use crate::field::{FieldType, ScalarKind};
    use crate::value::RawValue;
    use crate::violation::{FailureKind, Stage};

    fn age() -> Field {
        Field::new("age", FieldType::scalar(ScalarKind::Int32))
            .required()
            .with_full_name("test.Person.age")
            .with_rules(age_rules())
    }

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, RawValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), RawValue::from(*v)))
            .collect()
    }

    fn rules(arm: Type) -> FieldRules {
        FieldRules {
            message: None,
            r#type: Some(arm),
        }
    }

    #[test]
    fn age_in_range_passes() {
        let result = Validator::new().check_field(&age(), &input(&[("age", "30")]));
        assert!(result.is_passed());
        assert_eq!(result.field(), "age");
        assert!(result.messages().is_empty());
    }

    #[test]
    fn age_below_range_cites_interval() {
        let result = Validator::new().check_field(&age(), &input(&[("age", "17")]));
        assert!(!result.is_passed());
        assert_eq!(result.stage(), Some(Stage::Rules));
        assert_eq!(result.messages(), vec!["value must be in range [18, 65]"]);
        assert_eq!(result.violations()[0].rule_id(), "int32.gte_lte");
    }

    #[test]
    fn missing_age_yields_exactly_one_message() {
        let result = Validator::new().check_field(&age(), &input(&[]));
        assert_eq!(result.failure_kind(), Some(FailureKind::MissingRequiredField));
        assert_eq!(result.messages(), vec!["field age is required"]);
    }

    #[test]
    fn non_numeric_age_is_a_conversion_error() {
        let result = Validator::new().check_field(&age(), &input(&[("age", "abc")]));
        assert_eq!(result.failure_kind(), Some(FailureKind::ConversionError));
        assert_eq!(result.stage(), Some(Stage::Resolve));
        assert_eq!(result.messages().len(), 1);
        assert!(result.messages()[0].starts_with("cannot convert \"abc\" to int32"));
    }

    #[test]
    fn repeated_checks_are_idempotent() {
        let validator = Validator::new();
        let record = input(&[("age", "17")]);
        let first = validator.check_field(&age(), &record);
        let second = validator.check_field(&age(), &record);
        assert_eq!(first, second);

        let uncached = Validator::with_options(&[ValidatorOption::DisableCache]);
        assert_eq!(uncached.check_field(&age(), &record), first);
    }

    #[test]
    fn every_rule_failure_is_reported() {
        let field = Field::new("n", FieldType::scalar(ScalarKind::Int64)).with_rules(rules(
            Type::Int64(Int64Rules {
                r#const: Some(3),
                gt: Some(10),
                r#in: vec![4, 5],
                not_in: vec![1],
                ..Int64Rules::default()
            }),
        ));
        let record = input(&[("n", "1")]);

        let result = Validator::new().check_field(&field, &record);
        assert_eq!(
            result.messages(),
            vec![
                "value must equal 3",
                "value must be greater than 10",
                "value must be in list [4, 5]",
                "value must not be in list [1]",
            ]
        );

        let fail_fast = Validator::with_options(&[ValidatorOption::FailFast]);
        assert_eq!(
            fail_fast.check_field(&field, &record).messages(),
            vec!["value must equal 3"]
        );
    }

    #[test]
    fn open_range_rejects_both_endpoints() {
        let field = Field::new("ratio", FieldType::scalar(ScalarKind::Double)).with_rules(rules(
            Type::Double(DoubleRules {
                gt: Some(0.0),
                lt: Some(1.0),
                ..DoubleRules::default()
            }),
        ));
        let validator = Validator::new();

        assert!(
            validator
                .check_field(&field, &input(&[("ratio", "0.5")]))
                .is_passed()
        );
        for edge in ["0", "1"] {
            let result = validator.check_field(&field, &input(&[("ratio", edge)]));
            assert_eq!(result.messages(), vec!["value must be in range (0, 1)"]);
        }
    }

    #[test]
    fn same_named_fields_keep_their_own_rules() {
        let above_ten = Field::new("n", FieldType::scalar(ScalarKind::Int32)).with_rules(rules(
            Type::Int32(Int32Rules {
                gt: Some(10),
                ..Int32Rules::default()
            }),
        ));
        let negative = Field::new("n", FieldType::scalar(ScalarKind::Int32)).with_rules(rules(
            Type::Int32(Int32Rules {
                lt: Some(0),
                ..Int32Rules::default()
            }),
        ));
        let validator = Validator::new();
        let record = input(&[("n", "20")]);

        assert!(validator.check_field(&above_ten, &record).is_passed());
        assert_eq!(
            validator.check_field(&negative, &record).messages(),
            vec!["value must be less than 0"]
        );
        assert!(validator.check_field(&above_ten, &record).is_passed());
    }

    #[test]
    fn float_range_is_checked_in_f32() {
        let field = Field::new("score", FieldType::scalar(ScalarKind::Float)).with_rules(rules(
            Type::Float(FloatRules {
                gte: Some(0.5),
                lt: Some(2.5),
                ..FloatRules::default()
            }),
        ));
        let validator = Validator::new();

        for ok in ["0.5", "1", "2.25"] {
            assert!(
                validator
                    .check_field(&field, &input(&[("score", ok)]))
                    .is_passed(),
                "{ok} should pass"
            );
        }
        for bad in ["0.25", "2.5", "3"] {
            let result = validator.check_field(&field, &input(&[("score", bad)]));
            assert_eq!(result.messages(), vec!["value must be in range [0.5, 2.5)"]);
            assert_eq!(result.violations()[0].rule_id(), "float.gte_lt");
        }
    }

    #[test]
    fn rules_of_another_type_are_rejected() {
        let field = Field::new("name", FieldType::scalar(ScalarKind::String)).with_rules(rules(
            Type::Int32(Int32Rules {
                gt: Some(0),
                ..Int32Rules::default()
            }),
        ));
        let result = Validator::new().check_field(&field, &input(&[("name", "5")]));
        assert_eq!(result.failure_kind(), Some(FailureKind::UnknownRuleType));

        let wrapper = Field::new("limit", FieldType::message("google.protobuf.Int32Value"))
            .with_rules(rules(Type::Uint64(UInt64Rules::default())));
        let result = Validator::new().check_field(&wrapper, &input(&[("limit", "5")]));
        assert_eq!(
            result.messages(),
            vec!["expected rule `int32`, got `uint64` for field limit"]
        );
    }

    #[test]
    fn wrapper_fields_check_the_wrapped_scalar() {
        let field = Field::new("limit", FieldType::message("google.protobuf.UInt64Value"))
            .with_rules(rules(Type::Uint64(UInt64Rules {
                lte: Some(100),
                ..UInt64Rules::default()
            })));
        let validator = Validator::new();

        assert!(
            validator
                .check_field(&field, &input(&[("limit", "100")]))
                .is_passed()
        );
        let result = validator.check_field(&field, &input(&[("limit", "101")]));
        assert_eq!(result.violations()[0].rule_id(), "uint64.lte");
    }

    #[test]
    fn unknown_rule_shape_fails_resolution() {
        let field = Field::new("n", FieldType::scalar(ScalarKind::Int32)).with_rules(
            ConstraintDescriptor {
                rules: FieldRules::default(),
                unrecognized: Some(40),
            },
        );
        let result = Validator::new().check_field(&field, &input(&[("n", "1")]));
        assert_eq!(result.failure_kind(), Some(FailureKind::UnknownRuleType));
        assert_eq!(result.stage(), Some(Stage::Resolve));
    }

    #[test]
    fn typed_inputs_are_accepted() {
        let mut record = BTreeMap::new();
        record.insert("age".to_string(), RawValue::Int(40));
        assert!(Validator::new().check_field(&age(), &record).is_passed());

        record.insert("age".to_string(), RawValue::Float(40.5));
        let result = Validator::new().check_field(&age(), &record);
        assert_eq!(result.failure_kind(), Some(FailureKind::ConversionError));
    }

    #[test]
    fn batch_keeps_going_past_failures() {
        let note = Field::new("note", FieldType::scalar(ScalarKind::String));
        let count = Field::new("count", FieldType::scalar(ScalarKind::Int32))
            .required()
            .with_full_name("test.Counter.count")
            .with_rules(rules(Type::Int32(Int32Rules {
                gt: Some(0),
                ..Int32Rules::default()
            })));
        let fields = [age(), note, count];
        let record = input(&[("note", "hi"), ("count", "0")]);

        let validator = Validator::new();
        let results = validator.check_fields(&fields, &record);
        let kinds: Vec<_> = results.iter().map(ValidationResult::failure_kind).collect();
        assert_eq!(
            kinds,
            vec![
                Some(FailureKind::MissingRequiredField),
                None,
                Some(FailureKind::RuleViolation),
            ]
        );

        let Err(Error::Validation(err)) = validator.validate_fields(&fields, &record) else {
            panic!("expected validation error");
        };
        assert_eq!(err.violations.len(), 2);
        assert_eq!(
            err.to_string(),
            "field validation failed: age: field age is required; count: value must be greater than 0"
        );
    }

    #[test]
    fn message_fields_are_read_from_descriptor_options() {
        let desc = person_pool()
            .get_message_by_name("test.Person")
            .expect("message exists");
        let validator = Validator::new();

        let results = validator
            .check_message(&desc, &input(&[("age", "30")]))
            .expect("rules decode");
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(ValidationResult::is_passed));

        let results = validator
            .check_message(&desc, &input(&[("age", "70"), ("home", "elm street")]))
            .expect("rules decode");
        let failed: Vec<_> = results
            .iter()
            .filter(|result| !result.is_passed())
            .map(|result| (result.field(), result.failure_kind()))
            .collect();
        assert_eq!(
            failed,
            vec![
                ("age", Some(FailureKind::RuleViolation)),
                ("home", Some(FailureKind::UnsupportedType)),
            ]
        );

        assert!(matches!(
            validator.validate_message(&desc, &input(&[])),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn global_check_field_uses_shared_validator() {
        let field = age().with_full_name("test.Global.age");
        assert!(check_field(&field, &input(&[("age", "18")])).is_passed());
        assert!(!check_field(&field, &input(&[("age", "66")])).is_passed());
    }
}
