use thiserror::Error;

/// A form or action was rejected locally, before any request was sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field could not be parsed or is out of range
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// New password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Review rating outside 1..=5
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
