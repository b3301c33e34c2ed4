//! Reconciliation error types.

use campfin_shared::AppError;
use campfin_shared::types::{Money, TransactionId};
use thiserror::Error;

use crate::transaction::TransactionKind;

/// Errors that can occur while building or submitting a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// A batch mixes contributions and disbursements.
    #[error("Batch of {expected}s cannot contain {found} {id}")]
    MixedKinds {
        /// Kind of the batch.
        expected: TransactionKind,
        /// Kind of the offending transaction.
        found: TransactionKind,
        /// The offending transaction.
        id: TransactionId,
    },

    /// A transaction carries a negative amount.
    #[error("Transaction {0} has a negative amount")]
    NegativeAmount(TransactionId),

    /// The id is not part of the batch.
    #[error("Transaction {0} is not part of this batch")]
    UnknownTransaction(TransactionId),

    /// Verified transactions are immutable and cannot be selected again.
    #[error("Transaction {0} is already verified")]
    AlreadyVerified(TransactionId),

    /// Nothing is selected.
    #[error("No transactions selected")]
    EmptySelection,

    /// A selected transaction is above the per-transaction ceiling.
    #[error("Transaction {id} amount {amount} exceeds the per-transaction limit of {limit}")]
    LimitExceeded {
        /// The offending transaction.
        id: TransactionId,
        /// Its amount.
        amount: Money,
        /// The configured ceiling.
        limit: Money,
    },

    /// The rounded selected total does not match the bank total.
    #[error("Selected total {selected} does not match bank total {target}")]
    TotalMismatch {
        /// Sum of the selected amounts.
        selected: Money,
        /// Externally reported total.
        target: Money,
    },
}

impl ReconciliationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MixedKinds { .. } => "MIXED_KINDS",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::UnknownTransaction(_) => "UNKNOWN_TRANSACTION",
            Self::AlreadyVerified(_) => "ALREADY_VERIFIED",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            Self::TotalMismatch { .. } => "TOTAL_MISMATCH",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MixedKinds { .. } | Self::NegativeAmount(_) => 400,
            Self::UnknownTransaction(_) => 404,
            Self::AlreadyVerified(_) => 409,
            Self::EmptySelection | Self::LimitExceeded { .. } | Self::TotalMismatch { .. } => 422,
        }
    }
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::UnknownTransaction(_) => Self::NotFound(err.to_string()),
            ReconciliationError::AlreadyVerified(_) => Self::Conflict(err.to_string()),
            _ => Self::Reconciliation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_exceeded_display() {
        let id = TransactionId::new();
        let err = ReconciliationError::LimitExceeded {
            id,
            amount: Money::new(dec!(500)),
            limit: Money::new(dec!(400)),
        };
        assert_eq!(
            err.to_string(),
            format!("Transaction {id} amount 500.00 exceeds the per-transaction limit of 400.00")
        );
        assert_eq!(err.error_code(), "LIMIT_EXCEEDED");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_app_error_mapping() {
        let id = TransactionId::new();
        let app: AppError = ReconciliationError::AlreadyVerified(id).into();
        assert_eq!(app.status_code(), 409);
        let app: AppError = ReconciliationError::EmptySelection.into();
        assert_eq!(app.to_string(), "Reconciliation rejected: No transactions selected");
    }
}
