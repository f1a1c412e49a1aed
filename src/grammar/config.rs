//! Configuration for applying divide rules

/// Options for [`crate::subdivide`]
#[derive(Debug, Clone, Default)]
pub struct DivideConfig {
    /// Run the advisory validation pass and log what it finds
    pub validate: bool,

    /// Refuse to subdivide rules that have diagnostics.
    /// Implies `validate`.
    pub strict: bool,
}

impl DivideConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the validation pass
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub(crate) fn runs_validation(&self) -> bool {
        self.validate || self.strict
    }
}
