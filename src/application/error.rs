//! Application errors - Failures that abort an operation.
//!
//! Per-pair problems (degenerate tables, unknown columns, render failures)
//! do not surface here; they become `PairOutcome::Skipped`/`Failed`.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::ports::{ReportError, SourceError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
