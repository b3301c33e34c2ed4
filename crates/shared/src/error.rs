//! Application-wide error types.
//!
//! Engine modules report through their own error enums; callers that need a
//! single error type convert into `AppError`.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A mandatory field is absent. Carries the user-facing message verbatim.
    #[error("{0}")]
    MissingField(String),

    /// Owner percentages do not apportion the organization correctly.
    #[error("{0}")]
    OwnershipImbalance(String),

    /// A reconciliation selection cannot be submitted.
    #[error("Reconciliation rejected: {0}")]
    Reconciliation(String),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with the record's current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::OwnershipImbalance(_) | Self::Reconciliation(_) => 422,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::OwnershipImbalance(_) => "OWNERSHIP_IMBALANCE",
            Self::Reconciliation(_) => "RECONCILIATION_REJECTED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error should be shown to the user as-is.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::OwnershipImbalance(_) | Self::Reconciliation(_)
        )
    }
}

impl From<crate::config::ConfigLoadError> for AppError {
    fn from(err: crate::config::ConfigLoadError) -> Self {
        Self::Config(err.to_string())
    }
}
