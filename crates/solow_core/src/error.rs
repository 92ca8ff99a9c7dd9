use thiserror::Error;

/// Errors raised when model inputs fall outside the mathematical domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolowError {
    /// A parameter makes a closed-form formula or the recurrence undefined.
    #[error("Domain error: {0}")]
    Domain(String),
    #[error("Initial capital per worker must be positive and finite, got {0}.")]
    InvalidInitialCondition(f64),
}

impl SolowError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}
