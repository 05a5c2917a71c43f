//! Output configuration

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::ValidationError;

const MIN_SIDE: u32 = 200;
const MAX_SIDE: u32 = 10_000;

/// Where and how results are written
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the SVG charts
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Report style on standard output
    #[serde(default)]
    pub report_format: ReportFormat,
}

/// Report style on standard output
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{}' (expected table or json)", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("output.directory"));
        }
        let valid = |side: u32| (MIN_SIDE..=MAX_SIDE).contains(&side);
        if !valid(self.width) || !valid(self.height) {
            return Err(ValidationError::InvalidChartSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            report_format: ReportFormat::default(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("plots")
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.directory, PathBuf::from("plots"));
        assert_eq!((config.width, config.height), (1400, 1000));
        assert_eq!(config.report_format, ReportFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_chart() {
        let config = OutputConfig {
            width: 100,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidChartSize {
                width: 100,
                height: 1000
            })
        );
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("table".parse::<ReportFormat>(), Ok(ReportFormat::Table));
        assert!("xml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }
}
