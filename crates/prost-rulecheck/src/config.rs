/// Options for configuring the `Validator` at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidatorOption {
    /// Stop a field's rule check at the first violated rule instead of
    /// collecting all of them.
    FailFast,

    /// Recompile a field's rules on every check instead of caching them by
    /// the field's full name.
    DisableCache,
}

/// Runtime configuration passed to evaluators during validation.
#[derive(Debug, Clone, Default)]
pub(crate) struct ValidationConfig {
    pub fail_fast: bool,
}
