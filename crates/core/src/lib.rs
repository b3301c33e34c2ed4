//! Core business logic for Campfin.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All transaction types, completeness rules, and reconciliation math live here.
//!
//! # Modules
//!
//! - `transaction` - Contribution and disbursement records
//! - `validation` - Field completeness rules and first-error validation
//! - `ownership` - Owner apportionment for partnerships and LLCs
//! - `reconciliation` - Matching unverified transactions to a bank total
//! - `intake` - Submission checks combining validation and ownership

pub mod intake;
pub mod ownership;
pub mod reconciliation;
pub mod transaction;
pub mod validation;

pub use intake::{Intake, SubmissionError, check_submission};
pub use ownership::{OwnershipError, OwnershipLedger};
pub use reconciliation::{ReconciliationError, ReconciliationMatcher, ReconciliationSession};
pub use transaction::TransactionRecord;
pub use validation::{FieldRuleSet, MissingFieldError, Validator};
