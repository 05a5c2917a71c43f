//! Survey Source Port - Where raw survey responses come from.
//!
//! The application depends on this trait, while adapters (like
//! `CsvSurveySource`) provide the implementation.

use thiserror::Error;

use crate::domain::survey::SurveyDataset;

/// Port for reading raw, unprepared survey responses.
///
/// # Contract
///
/// Implementations must:
/// - Return header names exactly as exported (no trimming or renaming)
/// - Pad or truncate every record to the header width
/// - Report a missing source as `SourceError::NotFound`
///
/// # Usage
///
/// ```rust,ignore
/// let source: &dyn SurveySource = get_source();
///
/// let header = source.read_header()?;
/// let dataset = SurveyPreparer::new().prepare(source.load()?);
/// ```
pub trait SurveySource: Send + Sync {
    /// Reads only the header row.
    fn read_header(&self) -> Result<Vec<String>, SourceError>;

    /// Reads the header and every response.
    fn load(&self) -> Result<SurveyDataset, SourceError>;

    /// Human-readable location of the source, for logs and messages.
    fn describe(&self) -> String;
}

/// Errors that can occur while reading a survey source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Input file does not exist.
    #[error("Input file not found: {path}")]
    NotFound { path: String },

    /// Source has no header row.
    #[error("Input has no header row: {path}")]
    Empty { path: String },

    /// A record could not be parsed.
    #[error("Malformed input at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// IO error while reading.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl SourceError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
