//! Contribution and disbursement records.
//!
//! Records arrive already parsed from the form layer. Free-text and select
//! inputs keep their raw values so the validator can tell an empty box or an
//! untouched placeholder apart from real data.

pub mod types;

pub use types::{
    Address, EntityType, ParseEnumError, PartyInfo, PaymentDetails, PaymentMethod, PurposeCode,
    TransactionKind, TransactionRecord,
};
