//! Selection matching against a bank-reported total.
//!
//! A selection is eligible when it is non-empty, every selected amount is at
//! or below the batch ceiling, and the selected total matches the target once
//! both are rounded to the configured decimal places.

use std::collections::{HashMap, HashSet};

use campfin_shared::ReconciliationConfig;
use campfin_shared::types::{Money, TransactionId};
use tracing::debug;

use super::error::ReconciliationError;
use super::types::{BlockReason, Eligibility, ReconciliationBatch, Verdict, VerifiedSet};
use crate::transaction::TransactionRecord;

/// Decides whether a selection of transactions reconciles against its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationMatcher {
    tolerance: Money,
    decimal_places: u32,
}

impl Default for ReconciliationMatcher {
    fn default() -> Self {
        Self::from_config(&ReconciliationConfig::default())
    }
}

impl ReconciliationMatcher {
    /// Creates a matcher with an explicit tolerance and rounding precision.
    #[must_use]
    pub fn new(tolerance: Money, decimal_places: u32) -> Self {
        Self {
            tolerance: tolerance.abs(),
            decimal_places,
        }
    }

    /// Creates a matcher from configuration.
    #[must_use]
    pub fn from_config(config: &ReconciliationConfig) -> Self {
        Self::new(Money::new(config.tolerance), config.decimal_places)
    }

    /// Allowed gap between the rounded totals.
    #[must_use]
    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Rounded `selected` minus rounded `target`.
    #[must_use]
    pub fn difference(&self, selected: Money, target: Money) -> Money {
        selected.round_dp(self.decimal_places) - target.round_dp(self.decimal_places)
    }

    /// Returns true if the two totals agree within tolerance after rounding.
    #[must_use]
    pub fn totals_match(&self, selected: Money, target: Money) -> bool {
        self.difference(selected, target).abs() <= self.tolerance
    }

    /// Assesses already-resolved records against the batch.
    ///
    /// The ceiling is checked before the total, so an oversized transaction
    /// blocks submission even when the amounts add up.
    pub fn assess<'a, I>(&self, batch: &ReconciliationBatch, selected: I) -> Eligibility
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let selected: Vec<&TransactionRecord> = selected.into_iter().collect();
        let selected_total: Money = selected.iter().map(|tx| tx.amount).sum();
        let target = batch.target_amount();
        let limit = batch.per_transaction_limit();
        let difference = self.difference(selected_total, target);

        let verdict = if selected.is_empty() {
            Verdict::Blocked(BlockReason::EmptySelection)
        } else if let Some(tx) = selected.iter().find(|tx| tx.amount > limit) {
            Verdict::Blocked(BlockReason::LimitExceeded {
                id: tx.id,
                amount: tx.amount,
                limit,
            })
        } else if difference.abs() > self.tolerance {
            Verdict::Blocked(BlockReason::TotalMismatch {
                selected: selected_total,
                target,
            })
        } else {
            Verdict::Eligible
        };

        Eligibility {
            selected_count: selected.len(),
            selected_total,
            target,
            difference,
            verdict,
        }
    }

    /// Resolves ids against the batch and assesses them.
    ///
    /// Repeated ids count once. Unknown or already verified ids are errors.
    pub fn evaluate(
        &self,
        batch: &ReconciliationBatch,
        selection: &[TransactionId],
    ) -> Result<Eligibility, ReconciliationError> {
        let records = resolve(batch, selection)?;
        Ok(self.assess(batch, records))
    }

    /// Decides the selection without touching the batch.
    ///
    /// Returns the set that would be verified, or the first reason it cannot be.
    pub fn reconcile(
        &self,
        batch: &ReconciliationBatch,
        selection: &[TransactionId],
    ) -> Result<VerifiedSet, ReconciliationError> {
        let records = resolve(batch, selection)?;
        let eligibility = self.assess(batch, records.iter().copied());

        if let Verdict::Blocked(reason) = eligibility.verdict {
            debug!(
                batch_id = %batch.id(),
                selected = %eligibility.selected_total,
                target = %eligibility.target,
                ?reason,
                "Selection does not reconcile"
            );
            return Err(reason.into());
        }

        Ok(VerifiedSet {
            batch_id: batch.id(),
            verified_ids: records.iter().map(|tx| tx.id).collect(),
            total: eligibility.selected_total,
        })
    }
}

fn resolve<'b>(
    batch: &'b ReconciliationBatch,
    selection: &[TransactionId],
) -> Result<Vec<&'b TransactionRecord>, ReconciliationError> {
    let index: HashMap<TransactionId, &TransactionRecord> =
        batch.transactions().iter().map(|tx| (tx.id, tx)).collect();
    let mut seen: HashSet<TransactionId> = HashSet::with_capacity(selection.len());
    let mut records: Vec<&TransactionRecord> = Vec::with_capacity(selection.len());
    for id in selection {
        if !seen.insert(*id) {
            continue;
        }
        let tx = *index
            .get(id)
            .ok_or(ReconciliationError::UnknownTransaction(*id))?;
        if tx.verified {
            return Err(ReconciliationError::AlreadyVerified(*id));
        }
        records.push(tx);
    }
    Ok(records)
}
