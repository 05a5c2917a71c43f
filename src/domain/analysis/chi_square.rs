//! Chi-Square Test - Pearson's test of independence on a contingency table.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::ContingencyTable;
use crate::domain::foundation::{DomainError, ErrorCode, SignificanceLevel};

/// Largest adjustment Yates' continuity correction applies to a cell.
const YATES_ADJUSTMENT: f64 = 0.5;

/// Result of a chi-square independence test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareTest {
    /// The χ² statistic.
    pub statistic: f64,
    /// Degrees of freedom, `(rows - 1)(columns - 1)`.
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least this large under independence.
    pub p_value: f64,
    /// Expected counts under independence, same layout as the table.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied (only when dof = 1).
    pub continuity_corrected: bool,
    /// Number of respondents in the table.
    pub sample_size: u64,
    /// (rows, columns) of the tested table.
    pub shape: (usize, usize),
}

impl ChiSquareTest {
    /// Runs the test on a contingency table.
    ///
    /// # Algorithm
    /// - `E_ij = row_i * col_j / n`
    /// - With one degree of freedom, each observed count moves towards its
    ///   expected count by `min(0.5, |E - O|)` (Yates).
    /// - `χ² = Σ (O - E)² / E`, p-value from the χ² survival function.
    ///
    /// # Errors
    /// - `DegenerateTable` when fewer than two categories exist on an axis.
    /// - `DistributionError` if the χ² distribution cannot be built.
    pub fn of(table: &ContingencyTable) -> Result<Self, DomainError> {
        let table = table.without_empty_margins();
        if table.is_degenerate() {
            return Err(DomainError::degenerate_table(
                table.row_variable(),
                table.column_variable(),
                table.shape(),
            ));
        }

        let (rows, columns) = table.shape();
        let n = table.total();
        let total = n as f64;
        let row_totals = table.row_totals();
        let column_totals = table.column_totals();

        let expected: Vec<Vec<f64>> = row_totals
            .iter()
            .map(|&row| {
                column_totals
                    .iter()
                    .map(|&column| row as f64 * column as f64 / total)
                    .collect()
            })
            .collect();

        let degrees_of_freedom = (rows - 1) * (columns - 1);
        let continuity_corrected = degrees_of_freedom == 1;

        let mut statistic = 0.0;
        for (i, expected_row) in expected.iter().enumerate() {
            for (j, &e) in expected_row.iter().enumerate() {
                let mut observed = table.count(i, j) as f64;
                if continuity_corrected {
                    let diff = e - observed;
                    observed += diff.signum() * diff.abs().min(YATES_ADJUSTMENT);
                }
                statistic += (observed - e).powi(2) / e;
            }
        }

        let distribution = ChiSquared::new(degrees_of_freedom as f64).map_err(|e| {
            DomainError::new(ErrorCode::DistributionError, e.to_string())
                .with_detail("degrees_of_freedom", degrees_of_freedom.to_string())
        })?;
        let p_value = distribution.sf(statistic);

        Ok(Self {
            statistic,
            degrees_of_freedom,
            p_value,
            expected,
            continuity_corrected,
            sample_size: n,
            shape: (rows, columns),
        })
    }

    /// Returns true if independence is rejected at the given level.
    pub fn is_significant(&self, alpha: SignificanceLevel) -> bool {
        alpha.rejects(self.p_value)
    }
}
