//! Error types for the domain layer.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Rejected value object input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidPlan,

    // Dataset errors
    UnknownColumn,

    // Analysis errors
    DegenerateTable,
    NoComponents,
    DecompositionFailed,
    DistributionError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidPlan => "INVALID_PLAN",
            ErrorCode::UnknownColumn => "UNKNOWN_COLUMN",
            ErrorCode::DegenerateTable => "DEGENERATE_TABLE",
            ErrorCode::NoComponents => "NO_COMPONENTS",
            ErrorCode::DecompositionFailed => "DECOMPOSITION_FAILED",
            ErrorCode::DistributionError => "DISTRIBUTION_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Creates an error for a column the dataset does not contain.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            ErrorCode::UnknownColumn,
            format!("Column '{}' not found in dataset", column),
        )
        .with_detail("column", column)
    }

    /// Creates an error for a table that cannot support the requested analysis.
    pub fn degenerate_table(
        row_variable: &str,
        column_variable: &str,
        shape: (usize, usize),
    ) -> Self {
        Self::new(
            ErrorCode::DegenerateTable,
            format!(
                "Contingency table for '{}' and '{}' is degenerate or empty",
                row_variable, column_variable
            ),
        )
        .with_detail("rows", shape.0.to_string())
        .with_detail("columns", shape.1.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the (rows, columns) shape recorded by `degenerate_table`, if any.
    pub fn table_shape(&self) -> Option<(usize, usize)> {
        let rows = self.details.get("rows")?.parse().ok()?;
        let columns = self.details.get("columns")?.parse().ok()?;
        Some((rows, columns))
    }

    /// Returns true if this error means the pair should be skipped rather than aborted.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UnknownColumn | ErrorCode::DegenerateTable | ErrorCode::NoComponents
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
