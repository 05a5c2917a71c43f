//! Input configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the survey responses are read from
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// CSV export of the form responses
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl InputConfig {
    /// Returns the delimiter as the byte the CSV reader expects.
    ///
    /// Only meaningful after `validate()` has accepted the delimiter.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }

    /// Validate input configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("input.path"));
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ValidationError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("respostas.csv")
}

fn default_delimiter() -> char {
    ','
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_config_defaults() {
        let config = InputConfig::default();
        assert_eq!(config.path, PathBuf::from("respostas.csv"));
        assert_eq!(config.delimiter_byte(), b',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = InputConfig {
            delimiter: ';',
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_rejects_quote_and_non_ascii_delimiters() {
        for delimiter in ['"', '§'] {
            let config = InputConfig {
                delimiter,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidDelimiter(delimiter))
            );
        }
    }

    #[test]
    fn test_rejects_empty_path() {
        let config = InputConfig {
            path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
