//! Ownership error types.

use campfin_shared::AppError;
use campfin_shared::types::OwnerId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::validation::MissingFieldError;

/// Errors raised by the ownership ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// An owner is missing personal details.
    #[error(transparent)]
    OwnerFieldMissing(#[from] MissingFieldError),

    /// Owner percentage is zero or negative.
    #[error("Owner percentage is missing.")]
    InvalidPercent,

    /// No owner with this id.
    #[error("Owner {0} not found")]
    OwnerNotFound(OwnerId),

    /// Part of the organization is not attributed to any owner.
    #[error(
        "Ownership percentage total must add up to {required}%. You have {remaining}% left to attribute."
    )]
    Unattributed {
        /// Required total.
        required: Decimal,
        /// Percent still unattributed.
        remaining: Decimal,
    },

    /// Owners exist but do not sum to the required total.
    #[error("Ownership percentage total must add up to {required}%. Total is off by {delta}%.")]
    TotalOff {
        /// Required total.
        required: Decimal,
        /// Absolute gap between the total and the required total.
        delta: Decimal,
    },
}

impl OwnershipError {
    /// Builds an `Unattributed` error with normalized figures.
    #[must_use]
    pub fn unattributed(required: Decimal, remaining: Decimal) -> Self {
        Self::Unattributed {
            required: required.normalize(),
            remaining: remaining.normalize(),
        }
    }

    /// Builds a `TotalOff` error from the current total.
    #[must_use]
    pub fn total_off(required: Decimal, total: Decimal) -> Self {
        Self::TotalOff {
            required: required.normalize(),
            delta: (required - total).abs().normalize(),
        }
    }

    /// Returns true for the two apportionment imbalance variants.
    #[must_use]
    pub fn is_imbalance(&self) -> bool {
        matches!(self, Self::Unattributed { .. } | Self::TotalOff { .. })
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OwnerFieldMissing(_) => "OWNER_FIELD_MISSING",
            Self::InvalidPercent => "INVALID_OWNER_PERCENT",
            Self::OwnerNotFound(_) => "OWNER_NOT_FOUND",
            Self::Unattributed { .. } => "OWNERSHIP_UNATTRIBUTED",
            Self::TotalOff { .. } => "OWNERSHIP_TOTAL_OFF",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::OwnerFieldMissing(_) | Self::InvalidPercent => 400,
            Self::OwnerNotFound(_) => 404,
            Self::Unattributed { .. } | Self::TotalOff { .. } => 422,
        }
    }
}

impl From<OwnershipError> for AppError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::OwnerFieldMissing(_) | OwnershipError::InvalidPercent => {
                Self::MissingField(err.to_string())
            }
            OwnershipError::OwnerNotFound(_) => Self::NotFound(err.to_string()),
            OwnershipError::Unattributed { .. } | OwnershipError::TotalOff { .. } => {
                Self::OwnershipImbalance(err.to_string())
            }
        }
    }
}
