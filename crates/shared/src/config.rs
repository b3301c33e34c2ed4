//! Engine configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct EngineConfig {
    /// Reconciliation limits and tolerance.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// Ownership apportionment settings.
    #[serde(default)]
    pub ownership: OwnershipConfig,
}

/// Reconciliation configuration.
///
/// The per-transaction ceilings are compliance figures and differ between
/// contribution and disbursement flows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReconciliationConfig {
    /// Largest single contribution that may be reconciled.
    #[serde(default = "default_contribution_max")]
    pub contribution_max_per_transaction: Decimal,
    /// Largest single disbursement that may be reconciled.
    #[serde(default = "default_disbursement_max")]
    pub disbursement_max_per_transaction: Decimal,
    /// Allowed gap between the rounded selected total and the bank total.
    #[serde(default)]
    pub tolerance: Decimal,
    /// Decimal places both totals are rounded to before comparison.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_contribution_max() -> Decimal {
    Decimal::new(1000_00, 2)
}

fn default_disbursement_max() -> Decimal {
    Decimal::new(400_00, 2)
}

fn default_decimal_places() -> u32 {
    2
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            contribution_max_per_transaction: default_contribution_max(),
            disbursement_max_per_transaction: default_disbursement_max(),
            tolerance: Decimal::ZERO,
            decimal_places: default_decimal_places(),
        }
    }
}

/// Ownership apportionment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OwnershipConfig {
    /// Percentage the owners of a divisible organization must sum to.
    #[serde(default = "default_required_total")]
    pub required_total: Decimal,
}

fn default_required_total() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            required_total: default_required_total(),
        }
    }
}

/// Errors raised while loading or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The configuration sources could not be read or deserialized.
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    /// A value was read but is outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Loads configuration from `.env`, config files and environment.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `CAMPFIN__*` environment variables
    /// (e.g. `CAMPFIN__RECONCILIATION__TOLERANCE=0.01`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, ConfigLoadError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAMPFIN").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError::Invalid` naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let recon = &self.reconciliation;
        if recon.contribution_max_per_transaction.is_sign_negative() {
            return Err(ConfigLoadError::Invalid(
                "contribution_max_per_transaction must not be negative".to_string(),
            ));
        }
        if recon.disbursement_max_per_transaction.is_sign_negative() {
            return Err(ConfigLoadError::Invalid(
                "disbursement_max_per_transaction must not be negative".to_string(),
            ));
        }
        if recon.tolerance.is_sign_negative() {
            return Err(ConfigLoadError::Invalid(
                "tolerance must not be negative".to_string(),
            ));
        }
        if self.ownership.required_total <= Decimal::ZERO {
            return Err(ConfigLoadError::Invalid(
                "required_total must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
