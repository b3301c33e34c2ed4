//! Reconciliation types.

use campfin_shared::ReconciliationConfig;
use campfin_shared::types::{BatchId, Money, TransactionId};
use serde::Serialize;

use super::error::ReconciliationError;
use crate::transaction::{TransactionKind, TransactionRecord};

/// A set of same-kind transactions checked against one bank-reported total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationBatch {
    id: BatchId,
    kind: TransactionKind,
    target_amount: Money,
    per_transaction_limit: Money,
    transactions: Vec<TransactionRecord>,
}

impl ReconciliationBatch {
    /// Creates a batch with an explicit per-transaction ceiling.
    ///
    /// Every transaction must be of `kind` and carry a non-negative amount.
    pub fn new(
        kind: TransactionKind,
        target_amount: Money,
        per_transaction_limit: Money,
        transactions: Vec<TransactionRecord>,
    ) -> Result<Self, ReconciliationError> {
        for tx in &transactions {
            if tx.kind != kind {
                return Err(ReconciliationError::MixedKinds {
                    expected: kind,
                    found: tx.kind,
                    id: tx.id,
                });
            }
            if tx.amount.is_negative() {
                return Err(ReconciliationError::NegativeAmount(tx.id));
            }
        }

        Ok(Self {
            id: BatchId::new(),
            kind,
            target_amount,
            per_transaction_limit,
            transactions,
        })
    }

    /// Creates a batch whose ceiling is taken from configuration by kind.
    pub fn from_config(
        kind: TransactionKind,
        target_amount: Money,
        transactions: Vec<TransactionRecord>,
        config: &ReconciliationConfig,
    ) -> Result<Self, ReconciliationError> {
        let limit = match kind {
            TransactionKind::Contribution => config.contribution_max_per_transaction,
            TransactionKind::Disbursement => config.disbursement_max_per_transaction,
        };
        Self::new(kind, target_amount, Money::new(limit), transactions)
    }

    /// Batch identifier.
    #[must_use]
    pub fn id(&self) -> BatchId {
        self.id
    }

    /// Kind shared by every transaction in the batch.
    #[must_use]
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Externally reported total.
    #[must_use]
    pub fn target_amount(&self) -> Money {
        self.target_amount
    }

    /// Largest single amount that may be reconciled.
    #[must_use]
    pub fn per_transaction_limit(&self) -> Money {
        self.per_transaction_limit
    }

    /// All transactions, verified or not, in batch order.
    #[must_use]
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Looks up a transaction by id.
    #[must_use]
    pub fn get(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Transactions still awaiting verification.
    pub fn unverified(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions.iter().filter(|tx| !tx.verified)
    }

    /// Marks every listed transaction verified.
    pub(crate) fn mark_verified(&mut self, ids: &[TransactionId]) {
        for tx in &mut self.transactions {
            if ids.contains(&tx.id) {
                tx.verified = true;
            }
        }
    }

    /// Consumes the batch, returning its transactions.
    #[must_use]
    pub fn into_transactions(self) -> Vec<TransactionRecord> {
        self.transactions
    }
}

/// Why a selection cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum BlockReason {
    /// Nothing is selected.
    EmptySelection,
    /// A selected amount is above the ceiling.
    LimitExceeded {
        /// The first offending transaction in selection order.
        id: TransactionId,
        /// Its amount.
        amount: Money,
        /// The ceiling it broke.
        limit: Money,
    },
    /// The rounded totals differ by more than the tolerance.
    TotalMismatch {
        /// Sum of the selected amounts.
        selected: Money,
        /// Externally reported total.
        target: Money,
    },
}

impl From<BlockReason> for ReconciliationError {
    fn from(reason: BlockReason) -> Self {
        match reason {
            BlockReason::EmptySelection => Self::EmptySelection,
            BlockReason::LimitExceeded { id, amount, limit } => {
                Self::LimitExceeded { id, amount, limit }
            }
            BlockReason::TotalMismatch { selected, target } => {
                Self::TotalMismatch { selected, target }
            }
        }
    }
}

/// Outcome of a selection check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Verdict {
    /// The selection may be submitted.
    Eligible,
    /// The selection may not be submitted.
    Blocked(BlockReason),
}

/// Report produced for the current selection, used to drive the submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    /// Number of selected transactions.
    pub selected_count: usize,
    /// Exact sum of the selected amounts.
    pub selected_total: Money,
    /// Externally reported total.
    pub target: Money,
    /// Rounded selected total minus rounded target.
    pub difference: Money,
    /// Whether submission is allowed.
    pub verdict: Verdict,
}

impl Eligibility {
    /// Returns true if the selection may be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.verdict == Verdict::Eligible
    }
}

/// Transactions verified together by one successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedSet {
    /// Batch the transactions belong to.
    pub batch_id: BatchId,
    /// Verified ids in selection order.
    pub verified_ids: Vec<TransactionId>,
    /// Sum of the verified amounts.
    pub total: Money,
}
