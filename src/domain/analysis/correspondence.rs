//! Correspondence Analysis - Projects a contingency table onto its principal axes.

use nalgebra::DMatrix;
use serde::Serialize;

use super::{ContingencyTable, SingularValueDecomposition};
use crate::domain::foundation::{DomainError, ErrorCode, Percentage};

/// Number of axes a biplot can show.
pub const PLANE_COMPONENTS: usize = 2;

/// A fitted correspondence analysis.
///
/// Coordinates are principal coordinates: the distance between two row (or
/// two column) points approximates their chi-square distance.
#[derive(Debug, Clone, Serialize)]
pub struct CorrespondenceAnalysis {
    table: ContingencyTable,
    eigenvalues: Vec<f64>,
    total_inertia: f64,
    row_coordinates: Vec<Vec<f64>>,
    column_coordinates: Vec<Vec<f64>>,
}

impl CorrespondenceAnalysis {
    /// Fits a correspondence analysis with at most `max_components` axes.
    ///
    /// # Algorithm
    /// 1. Drop rows/columns with no counts.
    /// 2. `P = N / n`, row masses `r`, column masses `c`.
    /// 3. Standardized residuals `S = D_r^{-1/2} (P - r cᵀ) D_c^{-1/2}`.
    /// 4. `S = U Σ Vᵀ` (nalgebra), keeping `min(max_components, min(rows, cols) - 1)` axes.
    /// 5. Rows `F = D_r^{-1/2} U Σ`, columns `G = D_c^{-1/2} V Σ`.
    ///
    /// Each axis is oriented so that its largest-magnitude row loading in `U`
    /// is positive.
    ///
    /// # Errors
    /// - `DegenerateTable` when fewer than two categories remain on an axis.
    /// - `NoComponents` when `max_components` is zero.
    pub fn fit(table: &ContingencyTable, max_components: usize) -> Result<Self, DomainError> {
        let table = table.without_empty_margins();
        if table.is_degenerate() {
            return Err(DomainError::degenerate_table(
                table.row_variable(),
                table.column_variable(),
                table.shape(),
            ));
        }

        let (rows, columns) = table.shape();
        let n_components = max_components.min(rows.min(columns) - 1);
        if n_components == 0 {
            return Err(DomainError::new(
                ErrorCode::NoComponents,
                format!(
                    "Table for '{}' and '{}' is too small for any component",
                    table.row_variable(),
                    table.column_variable()
                ),
            )
            .with_detail("rows", rows.to_string())
            .with_detail("columns", columns.to_string()));
        }

        let total = table.total() as f64;
        let row_masses: Vec<f64> = table.row_totals().iter().map(|&t| t as f64 / total).collect();
        let column_masses: Vec<f64> = table
            .column_totals()
            .iter()
            .map(|&t| t as f64 / total)
            .collect();

        let residuals = DMatrix::from_fn(rows, columns, |i, j| {
            let observed = table.count(i, j) as f64 / total;
            let expected = row_masses[i] * column_masses[j];
            (observed - expected) / expected.sqrt()
        });
        let total_inertia = residuals.norm_squared();

        let svd = SingularValueDecomposition::truncated(&residuals, n_components)?;

        let row_coordinates = (0..rows)
            .map(|i| {
                (0..n_components)
                    .map(|k| svd.left[k][i] * svd.singular_values[k] / row_masses[i].sqrt())
                    .collect()
            })
            .collect();
        let column_coordinates = (0..columns)
            .map(|j| {
                (0..n_components)
                    .map(|k| svd.right[k][j] * svd.singular_values[k] / column_masses[j].sqrt())
                    .collect()
            })
            .collect();

        Ok(Self {
            eigenvalues: svd.singular_values.iter().map(|s| s * s).collect(),
            table,
            total_inertia,
            row_coordinates,
            column_coordinates,
        })
    }

    /// Returns the table the analysis was fitted on (empty margins removed).
    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    /// Returns the number of fitted axes.
    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns the principal inertia of each axis.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Returns the total inertia of the table (χ² / n).
    pub fn total_inertia(&self) -> f64 {
        self.total_inertia
    }

    /// Returns the share of total inertia each axis explains.
    pub fn explained_inertia(&self) -> Vec<Percentage> {
        self.eigenvalues
            .iter()
            .map(|&eigenvalue| Percentage::of(eigenvalue, self.total_inertia))
            .collect()
    }

    /// Returns row principal coordinates, one vector of `n_components` per row.
    pub fn row_coordinates(&self) -> &[Vec<f64>] {
        &self.row_coordinates
    }

    /// Returns column principal coordinates, one vector of `n_components` per column.
    pub fn column_coordinates(&self) -> &[Vec<f64>] {
        &self.column_coordinates
    }

    /// Returns row points on the first two axes. A missing second axis is 0.
    pub fn row_plane(&self) -> Vec<(f64, f64)> {
        to_plane(&self.row_coordinates)
    }

    /// Returns column points on the first two axes. A missing second axis is 0.
    pub fn column_plane(&self) -> Vec<(f64, f64)> {
        to_plane(&self.column_coordinates)
    }
}

fn to_plane(coordinates: &[Vec<f64>]) -> Vec<(f64, f64)> {
    coordinates
        .iter()
        .map(|point| {
            (
                point.first().copied().unwrap_or(0.0),
                point.get(1).copied().unwrap_or(0.0),
            )
        })
        .collect()
}
