//! Ownership ledger.
//!
//! A pure state container: every operation is synchronous and the total is
//! recomputed from the owners on each read, so it can never go stale.

use campfin_shared::OwnershipConfig;
use campfin_shared::types::OwnerId;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::OwnershipError;
use super::types::{LedgerState, Owner, OwnerInput};
use crate::validation::{OWNER_RULES, first_missing};

/// Owners of one divisible-ownership organization record.
#[derive(Debug, Clone)]
pub struct OwnershipLedger {
    owners: Vec<Owner>,
    required_total: Decimal,
    owners_view_error: Option<String>,
}

impl Default for OwnershipLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipLedger {
    /// Creates an empty ledger requiring 100%.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&OwnershipConfig::default())
    }

    /// Creates an empty ledger using the configured required total.
    #[must_use]
    pub fn with_config(config: &OwnershipConfig) -> Self {
        Self {
            owners: Vec::new(),
            required_total: config.required_total,
            owners_view_error: None,
        }
    }

    /// Rebuilds a ledger from stored owners without re-checking them.
    ///
    /// Incomplete owners are still caught by [`OwnershipLedger::submit`].
    #[must_use]
    pub fn from_owners(owners: Vec<Owner>, config: &OwnershipConfig) -> Self {
        let mut ledger = Self::with_config(config);
        ledger.owners = owners;
        ledger
    }

    /// Owners in entry order.
    #[must_use]
    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    /// Looks up an owner.
    #[must_use]
    pub fn get(&self, id: OwnerId) -> Option<&Owner> {
        self.owners.iter().find(|o| o.id == id)
    }

    /// Number of owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns true when no owner has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Sum of every current owner's percentage.
    #[must_use]
    pub fn total_percent(&self) -> Decimal {
        self.owners.iter().map(Owner::percent).sum()
    }

    /// Percentage still to attribute. Negative when over-allocated.
    #[must_use]
    pub fn remaining_percent(&self) -> Decimal {
        self.required_total - self.total_percent()
    }

    /// Message currently shown in the owners view.
    #[must_use]
    pub fn owners_view_error(&self) -> Option<&str> {
        self.owners_view_error.as_deref()
    }

    /// Snapshot of the ledger.
    #[must_use]
    pub fn state(&self) -> LedgerState {
        LedgerState {
            owners: self.owners.clone(),
            total_percent: self.total_percent(),
            remaining_percent: self.remaining_percent(),
            owners_view_error: self.owners_view_error.clone(),
        }
    }

    /// Adds an owner.
    ///
    /// Owners that push the total past the required figure are accepted and
    /// flagged in the owners view.
    pub fn add(&mut self, input: OwnerInput) -> Result<LedgerState, OwnershipError> {
        self.check_owner(&input)?;

        let remaining_before = self.remaining_percent();
        let owner = Owner::new(input);
        debug!(owner_id = %owner.id, percent = %owner.percent(), "owner added");
        self.owners.push(owner);
        self.flag_over_allocation(remaining_before);

        Ok(self.state())
    }

    /// Replaces an owner's details, keeping its id.
    pub fn edit(&mut self, id: OwnerId, input: OwnerInput) -> Result<LedgerState, OwnershipError> {
        let index = self.index_of(id)?;
        self.check_owner(&input)?;

        let remaining_before = self.remaining_percent() + self.owners[index].percent();
        self.owners[index].details = input;
        debug!(owner_id = %id, percent = %self.owners[index].percent(), "owner edited");
        self.flag_over_allocation(remaining_before);

        Ok(self.state())
    }

    /// Deletes an owner. Its share leaves the total immediately.
    pub fn remove(&mut self, id: OwnerId) -> Result<LedgerState, OwnershipError> {
        let index = self.index_of(id)?;
        let removed = self.owners.remove(index);
        debug!(owner_id = %removed.id, percent = %removed.percent(), "owner removed");

        if self.total_percent() <= self.required_total {
            self.owners_view_error = None;
        }

        Ok(self.state())
    }

    /// Checks the ledger before the parent record is submitted.
    ///
    /// Owner details are checked first (in entry order), then the total.
    pub fn submit(&self) -> Result<(), OwnershipError> {
        for owner in &self.owners {
            Self::check_details(&owner.details).inspect_err(|err| {
                debug!(owner_id = %owner.id, error = %err, "owner blocks submission");
            })?;
        }

        if self.owners.is_empty() {
            return Err(OwnershipError::unattributed(
                self.required_total,
                self.required_total,
            ));
        }

        let total = self.total_percent();
        if total != self.required_total {
            debug!(%total, required = %self.required_total, "ownership total off");
            return Err(OwnershipError::total_off(self.required_total, total));
        }

        info!(owners = self.owners.len(), "ownership ledger balanced");
        Ok(())
    }

    fn index_of(&self, id: OwnerId) -> Result<usize, OwnershipError> {
        self.owners
            .iter()
            .position(|o| o.id == id)
            .ok_or(OwnershipError::OwnerNotFound(id))
    }

    fn check_details(input: &OwnerInput) -> Result<(), OwnershipError> {
        if let Some(err) = first_missing(OWNER_RULES, input) {
            return Err(err.into());
        }
        if input.percent <= Decimal::ZERO {
            return Err(OwnershipError::InvalidPercent);
        }
        Ok(())
    }

    /// Rejected input leaves the owners untouched and is reported in the
    /// owners view.
    fn check_owner(&mut self, input: &OwnerInput) -> Result<(), OwnershipError> {
        Self::check_details(input).inspect_err(|err| {
            self.owners_view_error = Some(err.to_string());
        })
    }

    fn flag_over_allocation(&mut self, remaining_before: Decimal) {
        self.owners_view_error = (self.total_percent() > self.required_total).then(|| {
            OwnershipError::unattributed(self.required_total, remaining_before.max(Decimal::ZERO))
                .to_string()
        });
    }
}
