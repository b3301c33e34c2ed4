//! Fractional ownership of divisible organizations.
//!
//! Partnerships and LLCs list their owners with a percentage each. The
//! ledger keeps the aggregate in step with every add, edit and delete and
//! refuses submission until the owners sum to exactly 100%.

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use error::OwnershipError;
pub use ledger::OwnershipLedger;
pub use types::{LedgerState, Owner, OwnerInput};
