use std::fmt;

/// Machine-readable category of a field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FailureKind {
    /// A required field has no entry in the input.
    MissingRequiredField,
    /// The constraint option carries a rule shape outside the known set.
    UnknownRuleType,
    /// The resolved rule kind has no numeric validators.
    UnsupportedType,
    /// The raw value could not be coerced to the rule's numeric type.
    ConversionError,
    /// One or more compiled rules rejected the value.
    RuleViolation,
}

/// The orchestration stage a failure was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Presence checking.
    Required,
    /// Rule resolution and value coercion.
    Resolve,
    /// Compiled rule evaluation.
    Rules,
}

impl FailureKind {
    /// Returns the stage that raises this kind of failure.
    #[must_use]
    pub fn stage(self) -> Stage {
        match self {
            Self::MissingRequiredField => Stage::Required,
            Self::UnknownRuleType | Self::UnsupportedType | Self::ConversionError => Stage::Resolve,
            Self::RuleViolation => Stage::Rules,
        }
    }
}

/// A single instance where a field check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    field_path: String,
    kind: FailureKind,
    rule_id: String,
    message: String,
}

impl Violation {
    pub(crate) fn new(
        field_path: impl Into<String>,
        kind: FailureKind,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the field this violation belongs to.
    #[must_use]
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// Returns the failure category.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the dotted rule identifier, e.g. `int32.gte_lte`.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            if self.field_path.is_empty() {
                write!(f, "{}", self.message)
            } else {
                write!(f, "{}: {}", self.field_path, self.message)
            }
        } else if !self.rule_id.is_empty() {
            if self.field_path.is_empty() {
                write!(f, "[{}]", self.rule_id)
            } else {
                write!(f, "{}: [{}]", self.field_path, self.rule_id)
            }
        } else {
            write!(f, "[unknown]")
        }
    }
}
