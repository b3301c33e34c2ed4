//! Owner domain types.

use campfin_shared::types::OwnerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::Address;
use crate::validation::{Field, FieldSource};

/// Owner details as entered in the owners form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerInput {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Postal address.
    #[serde(flatten)]
    pub address: Address,
    /// Share of the organization, in percent.
    pub percent: Decimal,
}

/// A fractional owner held by an [`OwnershipLedger`](super::OwnershipLedger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Owner identifier, stable across edits.
    pub id: OwnerId,
    /// Entered details.
    #[serde(flatten)]
    pub details: OwnerInput,
}

impl Owner {
    /// Creates an owner with a fresh id.
    #[must_use]
    pub fn new(details: OwnerInput) -> Self {
        Self {
            id: OwnerId::new(),
            details,
        }
    }

    /// Share of the organization, in percent.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.details.percent
    }
}

impl FieldSource for OwnerInput {
    fn field_value(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::AddressLine1 => self.address.address_line1.as_deref(),
            Field::City => self.address.city.as_deref(),
            Field::State => self.address.state.as_deref(),
            Field::PostalCode => self.address.postal_code.as_deref(),
            _ => None,
        }
    }
}

impl FieldSource for Owner {
    fn field_value(&self, field: Field) -> Option<&str> {
        self.details.field_value(field)
    }
}

/// Snapshot of a ledger returned after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Owners in entry order.
    pub owners: Vec<Owner>,
    /// Sum of all owners' percentages.
    pub total_percent: Decimal,
    /// Required total minus `total_percent`; negative when over-allocated.
    pub remaining_percent: Decimal,
    /// Message for the owners view, if any.
    pub owners_view_error: Option<String>,
}
