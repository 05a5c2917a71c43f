//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid CSV delimiter {0:?}: must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),

    #[error("Invalid chart size {width}x{height}: each side must be between 200 and 10000 pixels")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Invalid significance level {0}: must be strictly between 0 and 1")]
    InvalidSignificanceLevel(f64),

    #[error("At least one correspondence-analysis component is required")]
    InvalidMaxComponents,

    #[error("Invalid label layout setting: {0}")]
    InvalidLayout(&'static str),
}
