//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! survey analysis domain.

mod errors;
mod percentage;
mod significance_level;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use percentage::Percentage;
pub use significance_level::SignificanceLevel;
