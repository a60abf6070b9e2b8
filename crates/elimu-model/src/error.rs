//! Error types for model-level validation.

use thiserror::Error;

/// Errors raised while validating user-supplied model values.
///
/// Normalization never fails; these only cover values a user typed in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Phone number is not a Safaricom mobile number.
    #[error("invalid M-Pesa phone number: {0}")]
    InvalidPhone(String),

    /// Section name does not map to any dashboard section.
    #[error("unknown dashboard section: {0}")]
    UnknownSection(String),

    /// A required credential field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl ModelError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidPhone(_) => "Please enter a valid Safaricom number (e.g., 0712345678).",
            Self::UnknownSection(_) => "That section does not exist.",
            Self::MissingField(_) => "Email and password are required.",
        }
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ModelError::InvalidPhone("123".to_string());
        assert!(err.user_message().contains("Safaricom"));

        let err = ModelError::MissingField("email");
        assert!(err.user_message().contains("required"));
    }
}
