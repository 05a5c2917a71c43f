//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A share between 0 and 100 inclusive, kept with full precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new Percentage, clamping to valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("percentage", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Creates a Percentage from a part of a whole. A zero whole yields zero.
    pub fn of(part: f64, whole: f64) -> Self {
        if whole <= 0.0 {
            return Self::ZERO;
        }
        Self::new(part / whole * 100.0)
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
