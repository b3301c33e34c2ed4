//! Field completeness rules and the record validator.
//!
//! This module implements form validation for the engine:
//! - `rules` - Declarative (kind × entity type × payment method) rule matrix
//! - `validator` - Short-circuit, first-error-wins evaluation
//! - `error` - Missing field error reported to the user verbatim

pub mod error;
pub mod rules;
pub mod validator;

#[cfg(test)]
mod validation_props;

pub use error::MissingFieldError;
pub use rules::{
    Field, FieldRule, FieldRuleSet, FieldSource, OWNER_RULES, Presence, RuleKey, STATE_PLACEHOLDER,
};
pub use validator::{Validator, first_missing};
