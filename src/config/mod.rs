//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SURVEY_INSIGHTS` prefix and nested values use double underscores as separators.
//! Command-line flags override individual values after loading.
//!
//! # Example
//!
//! ```no_run
//! use survey_insights::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading responses from {}", config.input.path.display());
//! ```

mod analysis;
mod error;
mod input;
mod logging;
mod output;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use input::InputConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use output::{OutputConfig, ReportFormat};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Survey export location and CSV dialect
    #[serde(default)]
    pub input: InputConfig,

    /// Chart directory, chart size and report format
    #[serde(default)]
    pub output: OutputConfig,

    /// Statistical settings and analysis plan
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `SURVEY_INSIGHTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits list-valued keys on commas
    ///
    /// # Environment Variable Format
    ///
    /// - `SURVEY_INSIGHTS__INPUT__PATH=export.csv` -> `input.path = export.csv`
    /// - `SURVEY_INSIGHTS__ANALYSIS__SIGNIFICANCE_LEVEL=0.01` -> `analysis.significance_level = 0.01`
    /// - `SURVEY_INSIGHTS__ANALYSIS__MULTISELECT_COLUMNS=A,B` -> `analysis.multiselect_columns = [A, B]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SURVEY_INSIGHTS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("analysis.multiselect_columns")
                    .with_list_parse_key("analysis.dropped_columns"),
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
        self.input.validate()?;
        self.output.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}
