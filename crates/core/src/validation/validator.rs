//! Record validator.
//!
//! Rules are evaluated in declared order and evaluation stops at the first
//! failure. Users see one error at a time.

use tracing::debug;

use super::error::MissingFieldError;
use super::rules::{FieldRule, FieldRuleSet, FieldSource, RuleKey};
use crate::transaction::TransactionRecord;

/// Returns the first rule in `rules` that `source` does not satisfy.
#[must_use]
pub fn first_missing<S: FieldSource + ?Sized>(
    rules: &[FieldRule],
    source: &S,
) -> Option<MissingFieldError> {
    rules
        .iter()
        .find(|rule| !rule.is_satisfied_by(source))
        .map(|rule| MissingFieldError {
            field: rule.field,
            message: rule.message,
        })
}

/// Applies a `FieldRuleSet` to records and owners.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: FieldRuleSet,
}

impl Validator {
    /// Creates a validator over `rules`.
    #[must_use]
    pub fn new(rules: FieldRuleSet) -> Self {
        Self { rules }
    }

    /// The rule matrix in use.
    #[must_use]
    pub fn rules(&self) -> &FieldRuleSet {
        &self.rules
    }

    /// Validates a record, reporting only the first missing field.
    pub fn validate(&self, record: &TransactionRecord) -> Result<(), MissingFieldError> {
        match first_missing(self.rules.get(RuleKey::of(record)), record) {
            Some(err) => {
                debug!(
                    record_id = %record.id,
                    kind = %record.kind,
                    field = err.field.name(),
                    "record failed validation"
                );
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Every missing field of a record, in declared order.
    ///
    /// Diagnostics only; user-facing flows call [`Validator::validate`].
    #[must_use]
    pub fn validate_all(&self, record: &TransactionRecord) -> Vec<MissingFieldError> {
        self.rules
            .get(RuleKey::of(record))
            .iter()
            .filter(|rule| !rule.is_satisfied_by(record))
            .map(|rule| MissingFieldError {
                field: rule.field,
                message: rule.message,
            })
            .collect()
    }
}
