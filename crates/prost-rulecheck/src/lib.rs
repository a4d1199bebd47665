//! Field-level validation of raw input values against
//! [protoc-gen-validate](https://github.com/bufbuild/protoc-gen-validate)
//! style `(validate.rules)` constraints.
//!
//! Each field is checked in three stages: presence, then rule resolution and
//! value coercion, then the compiled rules. The first failing stage ends the
//! check. Within the rule stage every rule runs, so all violations of a field
//! are reported at once.
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use prost_rulecheck::types::{FieldRules, Int32Rules, field_rules};
//! use prost_rulecheck::{Field, FieldType, RawValue, ScalarKind, Validator};
//!
//! let age = Field::new("age", FieldType::scalar(ScalarKind::Int32))
//!     .required()
//!     .with_rules(FieldRules {
//!         message: None,
//!         r#type: Some(field_rules::Type::Int32(Int32Rules {
//!             gte: Some(18),
//!             lte: Some(65),
//!             ..Int32Rules::default()
//!         })),
//!     });
//!
//! let validator = Validator::new();
//! let mut input = HashMap::new();
//! input.insert("age".to_string(), RawValue::from("17"));
//!
//! let result = validator.check_field(&age, &input);
//! assert_eq!(result.messages(), vec!["value must be in range [18, 65]"]);
//! ```
//!
//! Fields can also be read from `prost-reflect` descriptors with
//! [`Field::from_descriptor`] or checked message-wide with
//! [`Validator::check_message`].
//!
//! # Error types
//!
//! | Type | When |
//! |------|------|
//! | [`ValidationError`] | One or more fields failed their checks |
//! | [`CompilationError`] | A `(validate.rules)` option could not be decoded |
//!
//! Both are unified under [`Error`]. [`CoercionError`] is returned by the
//! standalone [`coerce`] function.

#![warn(missing_docs)]

mod config;
mod error;
mod field;
mod result;
mod validator;
mod value;
mod violation;

/// Re-export of `prost-rulecheck-types` for building constraint descriptors.
pub use prost_rulecheck_types as types;

pub use config::ValidatorOption;
pub use error::{CoercionError, CompilationError, ConversionError, Error, ValidationError};
pub use field::{Field, FieldType, ScalarKind};
pub use result::ValidationResult;
pub use validator::coerce::{NumericKind, NumericValue, coerce, coerce_resolved};
pub use validator::resolve::{ResolvedRules, RuleKind, RuleMismatch, RulePayload, resolve};
pub use validator::rules::number::{Number, NumberRule, NumericRules, compile};
pub use validator::{Validator, check_field, run};
pub use value::{Input, RawValue};
pub use violation::{FailureKind, Stage, Violation};
