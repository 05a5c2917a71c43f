//! Significance level value object for hypothesis tests.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// The alpha threshold below which a p-value counts as significant.
///
/// Always strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// The conventional 5% level.
    pub const FIVE_PERCENT: Self = Self(0.05);

    /// Creates a SignificanceLevel, returning error if not in (0, 1).
    pub fn try_new(alpha: f64) -> Result<Self, ValidationError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ValidationError::out_of_range(
                "significance_level",
                0.0,
                1.0,
                alpha,
            ));
        }
        Ok(Self(alpha))
    }

    /// Returns the alpha value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if the p-value rejects the null hypothesis at this level.
    pub fn rejects(&self, p_value: f64) -> bool {
        p_value < self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self::FIVE_PERCENT
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(level: SignificanceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "α = {}", self.0)
    }
}
