//! Configuration types for the rate engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::HolidayRules;
use crate::models::{TaxParameters, TimeAllocationParameters};

/// Metadata about the configuration set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the configuration.
    pub name: String,
    /// ISO country code the holiday rules apply to (e.g., "FR").
    pub country: String,
    /// Version or effective date of the configuration.
    pub version: String,
}

/// Default calculator parameters from defaults.yaml.
///
/// Every field is optional in the file; missing ones take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default time allocation.
    #[serde(default)]
    pub time_allocation: TimeAllocationParameters,
    /// Default tax rates.
    #[serde(default)]
    pub taxes: TaxParameters,
    /// VAT rate used for the TTC prices, in percent.
    #[serde(default = "default_vat_percent")]
    pub vat_percent: Decimal,
}

fn default_vat_percent() -> Decimal {
    crate::calculation::DEFAULT_VAT_PERCENT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            time_allocation: TimeAllocationParameters::default(),
            taxes: TaxParameters::default(),
            vat_percent: default_vat_percent(),
        }
    }
}

/// The complete engine configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    holidays: HolidayRules,
    defaults: DefaultsConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, holidays: HolidayRules, defaults: DefaultsConfig) -> Self {
        Self {
            metadata,
            holidays,
            defaults,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the holiday rules.
    pub fn holidays(&self) -> &HolidayRules {
        &self.holidays
    }

    /// Returns the default parameters.
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }
}
