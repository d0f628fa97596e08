//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::{RateEngine, validate_parameters};
use crate::calendar::{CalendarDate, HolidayRules};
use crate::error::{EngineError, EngineResult};

use super::types::{DefaultsConfig, EngineConfig, EngineMetadata};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and exposes the holiday rules and default parameters they define.
///
/// # Directory Structure
///
/// ```text
/// config/fr/
/// ├── engine.yaml     # Metadata
/// ├── holidays.yaml   # Fixed and Easter-relative public holidays
/// └── defaults.yaml   # Default time allocation, taxes and VAT rate
/// ```
///
/// # Example
///
/// ```no_run
/// use tjm_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fr").unwrap();
/// println!("Loaded configuration: {}", loader.metadata().name);
///
/// let engine = loader.rate_engine();
/// let stats = engine.year_stats(2024);
/// println!("Working days in 2024: {}", stats.working_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A holiday rule names an impossible month or day
    /// - The default parameters are out of range
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tjm_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/fr")?;
    /// # Ok::<(), tjm_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidayRules>(&holidays_path)?;
        Self::check_holidays(&holidays_path, &holidays)?;

        let defaults_path = path.join("defaults.yaml");
        let defaults = Self::load_yaml::<DefaultsConfig>(&defaults_path)?;
        validate_parameters(&defaults.time_allocation, &defaults.taxes).map_err(|e| {
            EngineError::ConfigParseError {
                path: defaults_path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        if defaults.vat_percent < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: defaults_path.display().to_string(),
                message: format!("vat_percent must not be negative, got {}", defaults.vat_percent),
            });
        }

        info!(
            name = %metadata.name,
            country = %metadata.country,
            version = %metadata.version,
            fixed_holidays = holidays.fixed.len(),
            easter_holidays = holidays.easter_offsets.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, holidays, defaults),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects fixed holidays that can never match a date.
    fn check_holidays(path: &Path, rules: &HolidayRules) -> EngineResult<()> {
        for holiday in &rules.fixed {
            // Checked against a leap year so February 29th is accepted.
            if CalendarDate::new(2000, holiday.month, holiday.day).is_none() {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "holiday '{}' has an invalid date {:02}-{:02}",
                        holiday.name, holiday.month, holiday.day
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the configured holiday rules.
    pub fn holiday_rules(&self) -> &HolidayRules {
        self.config.holidays()
    }

    /// Returns the configured default parameters.
    pub fn defaults(&self) -> &DefaultsConfig {
        self.config.defaults()
    }

    /// Builds a rate engine from the configured holidays and VAT rate.
    pub fn rate_engine(&self) -> RateEngine {
        RateEngine::new(self.holiday_rules().clone(), self.defaults().vat_percent)
    }
}
