//! Client-side validation of submission payloads.
//!
//! Only required-field checks run locally; everything else is the server's
//! call.

/// A draft failed a local check before submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftValidationError {
    /// A required text field was blank.
    #[error("{field} is required")]
    MissingField {
        /// Name of the offending field.
        field: String,
    },
    /// A numeric field was outside its accepted range.
    #[error("{field} must be at least {min}")]
    BelowMinimum {
        /// Name of the offending field.
        field: String,
        /// Smallest accepted value.
        min: u32,
    },
}

impl DraftValidationError {
    /// Convenience constructor for [`DraftValidationError::MissingField`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DraftValidationError> {
    if value.trim().is_empty() {
        return Err(DraftValidationError::missing(field));
    }
    Ok(())
}
