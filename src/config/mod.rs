//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TENDER_ECONOMICS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tender_economics::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Allocation ceiling: {}", config.analysis.allocation_ceiling);
//! ```

mod error;
mod logging;
mod reference;

pub use error::{ConfigError, ReferenceDataError, ValidationError};
pub use logging::LoggingConfig;
pub use reference::ReferenceData;

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::analysis::AnalysisSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Calculation settings (allocation ceiling, risk thresholds)
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Optional YAML file with extra templates and benchmarks
    #[serde(default)]
    pub reference_data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TENDER_ECONOMICS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TENDER_ECONOMICS__LOGGING__LEVEL=debug` -> `logging.level = debug`
    /// - `TENDER_ECONOMICS__ANALYSIS__RISK__LONG_DURATION_MONTHS=18` -> `analysis.risk.long_duration_months = 18`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TENDER_ECONOMICS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;

        let violations = self.analysis.violations();
        if !violations.is_empty() {
            let message = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ValidationError::InvalidAnalysis(message));
        }

        if let Some(path) = &self.reference_data_path {
            if !path.is_file() {
                return Err(ValidationError::ReferenceDataMissing(path.clone()));
            }
        }
        Ok(())
    }

    /// Load the configured reference data, or an empty set when none is configured
    pub fn reference_data(&self) -> Result<ReferenceData, ConfigError> {
        match &self.reference_data_path {
            Some(path) => Ok(ReferenceData::load(path)?),
            None => Ok(ReferenceData::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("TENDER_ECONOMICS__LOGGING__LEVEL");
        env::remove_var("TENDER_ECONOMICS__LOGGING__JSON");
        env::remove_var("TENDER_ECONOMICS__ANALYSIS__ALLOCATION_CEILING");
        env::remove_var("TENDER_ECONOMICS__ANALYSIS__RISK__LONG_DURATION_MONTHS");
        env::remove_var("TENDER_ECONOMICS__REFERENCE_DATA_PATH");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.logging.level, "info,tender_economics=debug");
        assert_eq!(config.analysis.allocation_ceiling, dec!(3));
        assert!(config.reference_data_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TENDER_ECONOMICS__LOGGING__LEVEL", "warn");
        env::set_var("TENDER_ECONOMICS__ANALYSIS__RISK__LONG_DURATION_MONTHS", "18");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.analysis.risk.long_duration_months, 18);
        assert_eq!(config.analysis.risk.low_risk_margin, dec!(15));
    }

    #[test]
    fn test_validate_rejects_bad_analysis_settings() {
        let mut config = AppConfig::default();
        config.analysis.allocation_ceiling = dec!(0);

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAnalysis(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_reference_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            reference_data_path: Some(dir.path().join("nope.yaml")),
            ..AppConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::ReferenceDataMissing(_))
        ));
    }

    #[test]
    fn test_reference_data_defaults_to_empty() {
        let config = AppConfig::default();
        let data = config.reference_data().unwrap();
        assert!(data.templates.is_empty());
        assert!(data.benchmarks.is_empty());
    }
}
