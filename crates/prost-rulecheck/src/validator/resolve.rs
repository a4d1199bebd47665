use std::fmt;

use prost_rulecheck_types::field_rules::Type;
use prost_rulecheck_types::{ConstraintDescriptor, MapRules, MessageRules, RepeatedRules};

use crate::field::{FieldType, ScalarKind};

/// The validation strategy selected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RuleKind {
    Float,
    Double,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Enum,
    Repeated,
    Map,
    Any,
    Duration,
    Timestamp,
    /// An embedded message without a rule arm.
    Message,
    /// A scalar arm applied to an embedded wrapper message.
    Wrapper,
    /// No validation required.
    None,
    /// The descriptor carries a rule shape outside the known set.
    Error,
}

impl RuleKind {
    /// Returns the rule family tag, e.g. `"sfixed32"` or `"wrapper"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::Repeated => "repeated",
            Self::Map => "map",
            Self::Any => "any",
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::Message => "message",
            Self::Wrapper => "wrapper",
            Self::None => "none",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint payload selected by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum RulePayload<'a> {
    /// The rule arm set on the descriptor.
    Arm(&'a Type),
    /// Default rules for an unconstrained repeated field.
    Repeated(RepeatedRules),
    /// Default rules for an unconstrained map of messages.
    Map(MapRules),
    /// Message-level rules of an unconstrained embedded message.
    Message(&'a MessageRules),
}

/// A rule arm that does not fit the field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMismatch {
    /// The arm set on the descriptor.
    pub rule: RuleKind,
    /// The arm the field type accepts, or `None` when no arm applies.
    pub expected: Option<RuleKind>,
}

impl fmt::Display for RuleMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Some(expected) => write!(f, "expected rule `{expected}`, got `{}`", self.rule),
            None => write!(f, "mismatched rules, `{}` is not a valid rule", self.rule),
        }
    }
}

/// The outcome of matching a field type against its constraint descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRules<'a> {
    /// The externally visible rule kind.
    pub kind: RuleKind,
    /// The scalar arm when `kind` is [`RuleKind::Wrapper`].
    pub wrapper_kind: Option<RuleKind>,
    /// The rule payload, if any.
    pub payload: Option<RulePayload<'a>>,
    /// Message-level rules set alongside the arm.
    pub message_rules: Option<&'a MessageRules>,
    /// Set when `kind` is [`RuleKind::Error`] because the arm does not fit the
    /// field type.
    pub mismatch: Option<RuleMismatch>,
}

impl ResolvedRules<'_> {
    /// Returns true when a scalar arm targets an embedded wrapper message.
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.wrapper_kind.is_some()
    }

    /// Returns the kind whose values are actually checked: the wrapped scalar
    /// for wrappers, `kind` otherwise.
    #[must_use]
    pub fn effective_kind(&self) -> RuleKind {
        self.wrapper_kind.unwrap_or(self.kind)
    }

    /// Returns the rule arm, if one was set.
    #[must_use]
    pub fn arm(&self) -> Option<&Type> {
        match self.payload {
            Some(RulePayload::Arm(arm)) => Some(arm),
            _ => None,
        }
    }

    fn bare(kind: RuleKind) -> Self {
        Self {
            kind,
            wrapper_kind: None,
            payload: None,
            message_rules: None,
            mismatch: None,
        }
    }
}

fn arm_kind(arm: &Type) -> RuleKind {
    match arm {
        Type::Float(_) => RuleKind::Float,
        Type::Double(_) => RuleKind::Double,
        Type::Int32(_) => RuleKind::Int32,
        Type::Int64(_) => RuleKind::Int64,
        Type::Uint32(_) => RuleKind::Uint32,
        Type::Uint64(_) => RuleKind::Uint64,
        Type::Sint32(_) => RuleKind::Sint32,
        Type::Sint64(_) => RuleKind::Sint64,
        Type::Fixed32(_) => RuleKind::Fixed32,
        Type::Fixed64(_) => RuleKind::Fixed64,
        Type::Sfixed32(_) => RuleKind::Sfixed32,
        Type::Sfixed64(_) => RuleKind::Sfixed64,
        Type::Bool(_) => RuleKind::Bool,
        Type::String(_) => RuleKind::String,
        Type::Bytes(_) => RuleKind::Bytes,
        Type::Enum(_) => RuleKind::Enum,
        Type::Repeated(_) => RuleKind::Repeated,
        Type::Map(_) => RuleKind::Map,
        Type::Any(_) => RuleKind::Any,
        Type::Duration(_) => RuleKind::Duration,
        Type::Timestamp(_) => RuleKind::Timestamp,
    }
}

fn scalar_rule(kind: ScalarKind) -> RuleKind {
    match kind {
        ScalarKind::Double => RuleKind::Double,
        ScalarKind::Float => RuleKind::Float,
        ScalarKind::Int32 => RuleKind::Int32,
        ScalarKind::Int64 => RuleKind::Int64,
        ScalarKind::Uint32 => RuleKind::Uint32,
        ScalarKind::Uint64 => RuleKind::Uint64,
        ScalarKind::Sint32 => RuleKind::Sint32,
        ScalarKind::Sint64 => RuleKind::Sint64,
        ScalarKind::Fixed32 => RuleKind::Fixed32,
        ScalarKind::Fixed64 => RuleKind::Fixed64,
        ScalarKind::Sfixed32 => RuleKind::Sfixed32,
        ScalarKind::Sfixed64 => RuleKind::Sfixed64,
        ScalarKind::Bool => RuleKind::Bool,
        ScalarKind::String => RuleKind::String,
        ScalarKind::Bytes => RuleKind::Bytes,
        ScalarKind::Enum => RuleKind::Enum,
    }
}

/// Maps a wrapper message full name to the rule arm of its wrapped scalar.
fn wrapper_rule(full_name: &str) -> Option<RuleKind> {
    match full_name {
        "google.protobuf.BoolValue" => Some(RuleKind::Bool),
        "google.protobuf.BytesValue" => Some(RuleKind::Bytes),
        "google.protobuf.DoubleValue" => Some(RuleKind::Double),
        "google.protobuf.FloatValue" => Some(RuleKind::Float),
        "google.protobuf.Int32Value" => Some(RuleKind::Int32),
        "google.protobuf.Int64Value" => Some(RuleKind::Int64),
        "google.protobuf.StringValue" => Some(RuleKind::String),
        "google.protobuf.UInt32Value" => Some(RuleKind::Uint32),
        "google.protobuf.UInt64Value" => Some(RuleKind::Uint64),
        _ => None,
    }
}

/// Maps a well-known message full name to its dedicated rule arm.
fn well_known_rule(full_name: &str) -> Option<RuleKind> {
    match full_name {
        "google.protobuf.Any" => Some(RuleKind::Any),
        "google.protobuf.Duration" => Some(RuleKind::Duration),
        "google.protobuf.Timestamp" => Some(RuleKind::Timestamp),
        _ => None,
    }
}

/// The only rule arm a field of type `ty` accepts, if any.
fn expected_rule(ty: &FieldType) -> Option<RuleKind> {
    match ty {
        FieldType::Scalar(kind) => Some(scalar_rule(*kind)),
        FieldType::Message(full_name) => {
            wrapper_rule(full_name).or_else(|| well_known_rule(full_name))
        }
        FieldType::Repeated(_) => Some(RuleKind::Repeated),
        FieldType::Map { .. } => Some(RuleKind::Map),
    }
}

/// Select the rule family for a field from its type and constraint descriptor.
///
/// The arm must fit the field type: the scalar's own arm, the wrapped
/// scalar's arm for wrapper messages (`google.protobuf.Int32Value` and the
/// like, resolved as [`RuleKind::Wrapper`]), `any`/`duration`/`timestamp` for
/// those well-known messages, `repeated` for lists and `map` for maps. Any
/// other pairing resolves to [`RuleKind::Error`] with
/// [`ResolvedRules::mismatch`] set. Without an arm the field's own structure
/// decides: repeated, map of messages, embedded message, or none.
#[must_use]
pub fn resolve<'a>(
    ty: &FieldType,
    descriptor: Option<&'a ConstraintDescriptor>,
) -> ResolvedRules<'a> {
    let message_rules = descriptor.and_then(|d| d.rules.message.as_ref());

    let Some(arm) = descriptor.and_then(|d| d.rules.r#type.as_ref()) else {
        if descriptor.is_some_and(|d| d.unrecognized.is_some()) {
            return ResolvedRules::bare(RuleKind::Error);
        }
        return resolve_structural(ty, message_rules);
    };

    let kind = arm_kind(arm);
    let expected = expected_rule(ty);
    if expected != Some(kind) {
        return ResolvedRules {
            mismatch: Some(RuleMismatch {
                rule: kind,
                expected,
            }),
            message_rules,
            ..ResolvedRules::bare(RuleKind::Error)
        };
    }

    let wrapped = matches!(ty, FieldType::Message(full_name) if wrapper_rule(full_name).is_some());
    let (kind, wrapper_kind) = if wrapped {
        (RuleKind::Wrapper, Some(kind))
    } else {
        (kind, None)
    };

    ResolvedRules {
        kind,
        wrapper_kind,
        payload: Some(RulePayload::Arm(arm)),
        message_rules,
        mismatch: None,
    }
}

fn resolve_structural<'a>(
    ty: &FieldType,
    message_rules: Option<&'a MessageRules>,
) -> ResolvedRules<'a> {
    let (kind, payload) = if ty.is_repeated() {
        (
            RuleKind::Repeated,
            Some(RulePayload::Repeated(RepeatedRules::default())),
        )
    } else if ty.is_map() && ty.element().is_some_and(FieldType::is_embed) {
        (RuleKind::Map, Some(RulePayload::Map(MapRules::default())))
    } else if ty.is_embed() {
        (RuleKind::Message, message_rules.map(RulePayload::Message))
    } else {
        return ResolvedRules::bare(RuleKind::None);
    };

    ResolvedRules {
        kind,
        wrapper_kind: None,
        payload,
        message_rules,
        mismatch: None,
    }
}
