use crate::error::ValidationError;
use crate::violation::{FailureKind, Stage, Violation};

/// The outcome of checking one field against one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    field: String,
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub(crate) fn passed(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            violations: Vec::new(),
        }
    }

    pub(crate) fn failed(field: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            field: field.into(),
            violations,
        }
    }

    /// The checked field's name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns true iff every stage and every rule succeeded.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every failure, in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Every failure message, in evaluation order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(Violation::message).collect()
    }

    /// The failure category, if the check failed.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.violations.first().map(Violation::kind)
    }

    /// The stage the check failed in, if it failed.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        self.failure_kind().map(FailureKind::stage)
    }

    /// Convert into a `Result`, keeping the violations on failure.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` carrying every violation if the check failed.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub(crate) fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
