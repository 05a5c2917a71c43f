//! Contingency Table - Cross-tabulated counts of two categorical questions.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::survey::SurveyDataset;

/// Counts of respondents for every (row category, column category) combination.
///
/// Labels are kept in ascending code-point order so the same data always
/// produces the same table layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    row_variable: String,
    column_variable: String,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Creates a builder for constructing a table by hand.
    pub fn builder(
        row_variable: impl Into<String>,
        column_variable: impl Into<String>,
    ) -> ContingencyTableBuilder {
        ContingencyTableBuilder::new(row_variable, column_variable)
    }

    /// Cross-tabulates two questions of a dataset.
    ///
    /// Respondents missing either answer are excluded.
    ///
    /// # Errors
    /// Returns `UnknownColumn` if either question is not in the dataset.
    pub fn cross_tabulate(
        dataset: &SurveyDataset,
        row_variable: &str,
        column_variable: &str,
    ) -> Result<Self, DomainError> {
        let pairs = dataset.paired_values(row_variable, column_variable)?;

        let row_labels: Vec<String> = pairs
            .iter()
            .map(|(row, _)| *row)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let column_labels: Vec<String> = pairs
            .iter()
            .map(|(_, column)| *column)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut counts = vec![vec![0u64; column_labels.len()]; row_labels.len()];
        for (row, column) in pairs {
            // Labels come from the same pairs, so both searches succeed.
            if let (Ok(i), Ok(j)) = (
                row_labels.binary_search_by(|l| l.as_str().cmp(row)),
                column_labels.binary_search_by(|l| l.as_str().cmp(column)),
            ) {
                counts[i][j] += 1;
            }
        }

        Ok(Self {
            row_variable: row_variable.to_string(),
            column_variable: column_variable.to_string(),
            row_labels,
            column_labels,
            counts,
        })
    }

    /// Returns the question on the row axis.
    pub fn row_variable(&self) -> &str {
        &self.row_variable
    }

    /// Returns the question on the column axis.
    pub fn column_variable(&self) -> &str {
        &self.column_variable
    }

    /// Returns the row categories.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Returns the column categories.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Returns the count matrix, one inner vector per row.
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Returns the count for a (row, column) position.
    pub fn count(&self, row: usize, column: usize) -> u64 {
        self.counts[row][column]
    }

    /// Returns (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    /// Returns true if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.column_labels.is_empty()
    }

    /// Returns true if the table cannot support a two-way analysis.
    ///
    /// That is the case when it is empty or has fewer than two categories on either axis.
    pub fn is_degenerate(&self) -> bool {
        let (rows, columns) = self.shape();
        self.is_empty() || rows.min(columns) < 2
    }

    /// Returns the number of respondents counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Returns the count total of every row.
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Returns the count total of every column.
    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.column_labels.len())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }

    /// Returns a copy without rows or columns whose counts are all zero.
    pub fn without_empty_margins(&self) -> Self {
        let row_totals = self.row_totals();
        let column_totals = self.column_totals();

        let kept_rows: Vec<usize> = (0..row_totals.len()).filter(|&i| row_totals[i] > 0).collect();
        let kept_columns: Vec<usize> = (0..column_totals.len())
            .filter(|&j| column_totals[j] > 0)
            .collect();

        Self {
            row_variable: self.row_variable.clone(),
            column_variable: self.column_variable.clone(),
            row_labels: kept_rows.iter().map(|&i| self.row_labels[i].clone()).collect(),
            column_labels: kept_columns
                .iter()
                .map(|&j| self.column_labels[j].clone())
                .collect(),
            counts: kept_rows
                .iter()
                .map(|&i| kept_columns.iter().map(|&j| self.counts[i][j]).collect())
                .collect(),
        }
    }
}

/// Builder for constructing ContingencyTable instances.
#[derive(Debug, Default)]
pub struct ContingencyTableBuilder {
    row_variable: String,
    column_variable: String,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ContingencyTableBuilder {
    /// Creates a new builder.
    pub fn new(row_variable: impl Into<String>, column_variable: impl Into<String>) -> Self {
        Self {
            row_variable: row_variable.into(),
            column_variable: column_variable.into(),
            ..Self::default()
        }
    }

    /// Sets the column categories.
    pub fn column_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a row category with its counts.
    pub fn row<I>(mut self, label: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.row_labels.push(label.into());
        self.counts.push(counts.into_iter().collect());
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    /// Returns `ValidationFailed` if a row's width differs from the column count.
    pub fn build(self) -> Result<ContingencyTable, DomainError> {
        let width = self.column_labels.len();
        if let Some((label, row)) = self
            .row_labels
            .iter()
            .zip(&self.counts)
            .find(|(_, row)| row.len() != width)
        {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Row '{}' has {} counts, expected {}", label, row.len(), width),
            ));
        }

        Ok(ContingencyTable {
            row_variable: self.row_variable,
            column_variable: self.column_variable,
            row_labels: self.row_labels,
            column_labels: self.column_labels,
            counts: self.counts,
        })
    }
}
