//! Validation error types.

use campfin_shared::AppError;
use thiserror::Error;

use super::rules::Field;

/// A mandatory field is absent.
///
/// Displays as the exact user-facing message, e.g. `"City is missing."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MissingFieldError {
    /// The first field that failed its presence check.
    pub field: Field,
    /// The message shown to the user.
    pub message: &'static str,
}

impl MissingFieldError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "MISSING_FIELD"
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl From<MissingFieldError> for AppError {
    fn from(err: MissingFieldError) -> Self {
        Self::MissingField(err.message.to_string())
    }
}
