//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Reference data error: {0}")]
    ReferenceData(#[from] ReferenceDataError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Log filter cannot be empty")]
    EmptyLogLevel,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid analysis settings: {0}")]
    InvalidAnalysis(String),

    #[error("Reference data file not found: {}", .0.display())]
    ReferenceDataMissing(PathBuf),
}

/// Errors that can occur while reading reference data
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed reference data: {0}")]
    Parse(#[from] serde_yaml::Error),
}
