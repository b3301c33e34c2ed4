//! Submission checks for a contribution or disbursement form.
//!
//! A record is accepted when every required field is filled in and, for
//! contributions from partnerships and LLCs, the owner ledger balances.
//! Field errors are reported before ownership errors.

use campfin_shared::types::TransactionId;
use campfin_shared::{AppError, EngineConfig, OwnershipConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::ownership::{Owner, OwnershipError, OwnershipLedger};
use crate::transaction::TransactionRecord;
use crate::validation::{MissingFieldError, Validator};

/// Why a record cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The record has been reconciled and can no longer change.
    #[error("Transaction {0} is verified and cannot be changed")]
    AlreadyVerified(TransactionId),

    /// A required record field is empty.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    /// The owner ledger does not balance or an owner is incomplete.
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
}

impl SubmissionError {
    /// Message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true when the message belongs on the owners view rather than
    /// the transaction form.
    ///
    /// Only per-owner detail errors qualify. Imbalanced totals are reported
    /// on the transaction form.
    #[must_use]
    pub fn is_owner_error(&self) -> bool {
        matches!(
            self,
            Self::Ownership(OwnershipError::OwnerFieldMissing(_) | OwnershipError::InvalidPercent)
        )
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyVerified(_) => "ALREADY_VERIFIED",
            Self::MissingField(e) => e.error_code(),
            Self::Ownership(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AlreadyVerified(_) => 409,
            Self::MissingField(e) => e.status_code(),
            Self::Ownership(e) => e.status_code(),
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::AlreadyVerified(_) => Self::Conflict(err.to_string()),
            SubmissionError::MissingField(e) => e.into(),
            SubmissionError::Ownership(e) => e.into(),
        }
    }
}

/// Checks a record with `validator`, then its owners when required.
///
/// A divisible organization without a ledger is treated as having no owners.
pub fn check_submission(
    validator: &Validator,
    record: &TransactionRecord,
    ledger: Option<&OwnershipLedger>,
) -> Result<(), SubmissionError> {
    check_with(validator, &OwnershipConfig::default(), record, ledger)
}

fn check_with(
    validator: &Validator,
    ownership: &OwnershipConfig,
    record: &TransactionRecord,
    ledger: Option<&OwnershipLedger>,
) -> Result<(), SubmissionError> {
    if record.verified {
        return Err(SubmissionError::AlreadyVerified(record.id));
    }

    validator.validate(record)?;

    if record.requires_ownership() {
        let empty;
        let ledger = match ledger {
            Some(ledger) => ledger,
            None => {
                empty = OwnershipLedger::with_config(ownership);
                &empty
            }
        };
        ledger.submit().inspect_err(|err| {
            debug!(record_id = %record.id, error = %err, "ownership blocks submission");
        })?;
    }

    info!(
        record_id = %record.id,
        kind = %record.kind,
        entity = record.entity_type.code(),
        "record accepted"
    );
    Ok(())
}

/// Form intake: a validator plus the ownership settings ledgers are built with.
#[derive(Debug, Clone, Default)]
pub struct Intake {
    validator: Validator,
    ownership: OwnershipConfig,
}

impl Intake {
    /// Creates an intake over `validator` and `ownership` settings.
    #[must_use]
    pub fn new(validator: Validator, ownership: OwnershipConfig) -> Self {
        Self {
            validator,
            ownership,
        }
    }

    /// Creates an intake with the standard rules and configured ownership.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Validator::default(), config.ownership.clone())
    }

    /// The validator in use.
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// An empty ledger using the configured required total.
    #[must_use]
    pub fn new_ledger(&self) -> OwnershipLedger {
        OwnershipLedger::with_config(&self.ownership)
    }

    /// Rebuilds a ledger from stored owners using the configured required total.
    #[must_use]
    pub fn ledger_from_owners(&self, owners: Vec<Owner>) -> OwnershipLedger {
        OwnershipLedger::from_owners(owners, &self.ownership)
    }

    /// Checks a record for submission.
    pub fn check(
        &self,
        record: &TransactionRecord,
        ledger: Option<&OwnershipLedger>,
    ) -> Result<(), SubmissionError> {
        check_with(&self.validator, &self.ownership, record, ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campfin_shared::types::Money;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::ownership::OwnerInput;
    use crate::transaction::{Address, EntityType, PartyInfo, PaymentMethod, TransactionKind};

    fn address() -> Address {
        Address {
            address_line1: Some("9 Elm Rd".into()),
            address_line2: None,
            city: Some("Dayton".into()),
            state: Some("Ohio".into()),
            postal_code: Some("45402".into()),
        }
    }

    fn record(entity_type: EntityType) -> TransactionRecord {
        let mut record = TransactionRecord::new(
            TransactionKind::Contribution,
            entity_type,
            PaymentMethod::Cash,
            Money::new(dec!(250)),
            NaiveDate::from_ymd_opt(2023, 10, 2).unwrap(),
        );
        record.party = PartyInfo {
            first_name: Some("Dee".into()),
            last_name: Some("Park".into()),
            organization_name: Some("Park & Sons".into()),
            address: address(),
            email: None,
            phone_number: None,
        };
        record
    }

    fn owner(percent: Decimal) -> OwnerInput {
        OwnerInput {
            first_name: Some("Dee".into()),
            last_name: Some("Park".into()),
            address: address(),
            percent,
        }
    }

    #[test]
    fn test_individual_needs_no_ledger() {
        let rec = record(EntityType::Individual);
        assert!(check_submission(&Validator::default(), &rec, None).is_ok());
    }

    #[test]
    fn test_partnership_without_ledger_is_unattributed() {
        let rec = record(EntityType::Partnership);
        let err = check_submission(&Validator::default(), &rec, None).unwrap_err();
        assert!(!err.is_owner_error());
        assert_eq!(
            err.message(),
            "Ownership percentage total must add up to 100%. You have 100% left to attribute."
        );
    }

    #[test]
    fn test_total_off_belongs_on_transaction_form() {
        let intake = Intake::default();
        let mut ledger = intake.new_ledger();
        ledger.add(owner(dec!(80))).unwrap();

        let err = intake.check(&record(EntityType::Partnership), Some(&ledger)).unwrap_err();
        assert!(matches!(err, SubmissionError::Ownership(OwnershipError::TotalOff { .. })));
        assert!(!err.is_owner_error());
    }

    #[test]
    fn test_incomplete_stored_owner_belongs_on_owners_view() {
        let intake = Intake::default();
        let mut stored = Owner::new(owner(dec!(100)));
        stored.details.last_name = None;
        let ledger = intake.ledger_from_owners(vec![stored]);

        let err = intake.check(&record(EntityType::Llc), Some(&ledger)).unwrap_err();
        assert_eq!(err.message(), "Owner Last name is missing.");
        assert!(err.is_owner_error());
    }

    #[test]
    fn test_rebuilt_ledger_keeps_configured_total() {
        let mut config = EngineConfig::default();
        config.ownership.required_total = dec!(50);
        let intake = Intake::from_config(&config);

        let mut ledger = intake.new_ledger();
        ledger.add(owner(dec!(50))).unwrap();
        assert!(intake.check(&record(EntityType::Partnership), Some(&ledger)).is_ok());

        let rebuilt = intake.ledger_from_owners(ledger.owners().to_vec());
        assert!(intake.check(&record(EntityType::Partnership), Some(&rebuilt)).is_ok());

        let mut short = rebuilt.clone();
        short.add(owner(dec!(5))).unwrap();
        assert_eq!(
            intake.check(&record(EntityType::Partnership), Some(&short)).unwrap_err().message(),
            "Ownership percentage total must add up to 50%. Total is off by 5%."
        );
    }

    #[test]
    fn test_field_errors_come_first() {
        let mut rec = record(EntityType::Llc);
        rec.party.organization_name = None;
        let err = check_submission(&Validator::default(), &rec, None).unwrap_err();
        assert_eq!(err.message(), "Entity name is missing.");
        assert!(!err.is_owner_error());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_balanced_ledger_accepts_llc() {
        let intake = Intake::default();
        let mut ledger = intake.new_ledger();
        ledger.add(owner(dec!(60))).unwrap();
        ledger.add(owner(dec!(40))).unwrap();

        assert!(intake.check(&record(EntityType::Llc), Some(&ledger)).is_ok());
    }

    #[test]
    fn test_off_by_delta_blocks_partnership() {
        let intake = Intake::default();
        let mut ledger = intake.new_ledger();
        ledger.add(owner(dec!(80))).unwrap();

        let err = intake.check(&record(EntityType::Partnership), Some(&ledger)).unwrap_err();
        assert_eq!(
            err.message(),
            "Ownership percentage total must add up to 100%. Total is off by 20%."
        );
        assert_eq!(err.error_code(), "OWNERSHIP_TOTAL_OFF");
    }

    #[test]
    fn test_disbursement_from_llc_skips_ledger() {
        let mut rec = record(EntityType::Llc);
        rec.kind = TransactionKind::Disbursement;
        rec.purpose_code = Some("OFFICE".into());
        assert!(check_submission(&Validator::default(), &rec, None).is_ok());
    }

    #[test]
    fn test_verified_record_is_frozen() {
        let mut rec = record(EntityType::Individual);
        rec.verified = true;
        let err = check_submission(&Validator::default(), &rec, None).unwrap_err();
        assert_eq!(err, SubmissionError::AlreadyVerified(rec.id));
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 409);
    }
}
