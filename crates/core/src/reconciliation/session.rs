//! Interactive reconciliation session.
//!
//! Holds the checkbox selection over a batch's unverified transactions and
//! verifies the whole selection at once on submit.

use campfin_shared::types::TransactionId;
use serde::Serialize;
use tracing::{info, warn};

use super::error::ReconciliationError;
use super::matcher::ReconciliationMatcher;
use super::types::{Eligibility, ReconciliationBatch, VerifiedSet};
use crate::transaction::TransactionRecord;

/// Result of toggling one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    /// Whether the transaction is now selected.
    pub selected: bool,
    /// Whether the submit control is enabled.
    pub can_submit: bool,
}

/// Selection state over one batch.
#[derive(Debug, Clone)]
pub struct ReconciliationSession {
    batch: ReconciliationBatch,
    matcher: ReconciliationMatcher,
    selection: Vec<TransactionId>,
}

impl ReconciliationSession {
    /// Starts a session with nothing selected.
    #[must_use]
    pub fn new(batch: ReconciliationBatch, matcher: ReconciliationMatcher) -> Self {
        Self {
            batch,
            matcher,
            selection: Vec::new(),
        }
    }

    /// The batch being reconciled.
    #[must_use]
    pub fn batch(&self) -> &ReconciliationBatch {
        &self.batch
    }

    /// Selected ids in the order they were checked.
    #[must_use]
    pub fn selection(&self) -> &[TransactionId] {
        &self.selection
    }

    /// Returns true if the transaction is checked.
    #[must_use]
    pub fn is_selected(&self, id: TransactionId) -> bool {
        self.selection.contains(&id)
    }

    /// Transactions still listed for reconciliation.
    pub fn unverified(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.batch.unverified()
    }

    /// Checks or unchecks a transaction.
    pub fn toggle(&mut self, id: TransactionId) -> Result<ToggleOutcome, ReconciliationError> {
        let tx = self
            .batch
            .get(id)
            .ok_or(ReconciliationError::UnknownTransaction(id))?;
        if tx.verified {
            return Err(ReconciliationError::AlreadyVerified(id));
        }

        let selected = if let Some(pos) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(pos);
            false
        } else {
            self.selection.push(id);
            true
        };

        Ok(ToggleOutcome {
            selected,
            can_submit: self.can_submit(),
        })
    }

    /// Checks every unverified transaction, in batch order.
    pub fn select_all(&mut self) -> Eligibility {
        self.selection = self.batch.unverified().map(|tx| tx.id).collect();
        self.evaluate()
    }

    /// Unchecks everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Assesses the current selection.
    #[must_use]
    pub fn evaluate(&self) -> Eligibility {
        let selected = self
            .selection
            .iter()
            .filter_map(|id| self.batch.get(*id));
        self.matcher.assess(&self.batch, selected)
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.evaluate().can_submit()
    }

    /// Verifies every selected transaction, or none of them.
    ///
    /// On success the selection is cleared and the verified records drop out
    /// of [`Self::unverified`]. On failure nothing changes.
    pub fn submit(&mut self) -> Result<VerifiedSet, ReconciliationError> {
        let verified = self
            .matcher
            .reconcile(&self.batch, &self.selection)
            .inspect_err(|err| {
                warn!(
                    batch_id = %self.batch.id(),
                    selected = self.selection.len(),
                    error = %err,
                    "Reconciliation rejected"
                );
            })?;

        self.batch.mark_verified(&verified.verified_ids);
        self.selection.clear();

        info!(
            batch_id = %verified.batch_id,
            count = verified.verified_ids.len(),
            total = %verified.total,
            "Transactions verified"
        );
        Ok(verified)
    }

    /// Ends the session, returning the batch with its verification state.
    #[must_use]
    pub fn into_batch(self) -> ReconciliationBatch {
        self.batch
    }
}
