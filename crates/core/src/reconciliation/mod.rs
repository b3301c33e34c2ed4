//! Bank reconciliation of unverified transactions.
//!
//! This module implements the reconciliation flow:
//! - `types` - Batches, eligibility reports and verified sets
//! - `matcher` - Rounded-total matching and per-transaction ceilings
//! - `session` - Checkbox selection and all-or-nothing submission
//! - `error` - Reconciliation error types

pub mod error;
pub mod matcher;
pub mod session;
pub mod types;

#[cfg(test)]
mod matcher_props;

pub use error::ReconciliationError;
pub use matcher::ReconciliationMatcher;
pub use session::{ReconciliationSession, ToggleOutcome};
pub use types::{BlockReason, Eligibility, ReconciliationBatch, Verdict, VerifiedSet};
