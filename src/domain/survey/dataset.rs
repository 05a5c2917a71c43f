//! Survey Dataset - Tabular respondent answers keyed by column name.

use crate::domain::foundation::DomainError;

/// Cell values that count as "no answer".
///
/// Mirrors the conventional NA markers of spreadsheet and dataframe tooling,
/// so exports from those tools round-trip without inventing categories.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a raw cell value represents a missing answer.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Survey responses: one row per respondent, one column per question.
///
/// Every row has exactly one cell per column. `None` marks a missing answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyDataset {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SurveyDataset {
    /// Creates an empty dataset with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a dataset from a header and raw string records.
    pub fn from_records<R, S>(columns: Vec<String>, records: R) -> Self
    where
        R: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let mut dataset = Self::new(columns);
        for record in records {
            dataset.push_record(record);
        }
        dataset
    }

    /// Appends one respondent.
    ///
    /// Short records are padded with missing cells and long records are
    /// truncated to the header width.
    pub fn push_record<S: AsRef<str>>(&mut self, record: Vec<S>) {
        let mut row: Vec<Option<String>> = record
            .iter()
            .take(self.columns.len())
            .map(|value| {
                let value = value.as_ref();
                if is_missing(value) {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect();
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Returns the column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of respondents.
    pub fn respondent_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no respondents.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns every respondent's answer to one question.
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<&str>>, DomainError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| DomainError::unknown_column(name))?;

        Ok(self.rows.iter().map(|row| row[index].as_deref()).collect())
    }

    /// Returns the answer pairs of respondents who answered both questions.
    pub fn paired_values(&self, first: &str, second: &str) -> Result<Vec<(&str, &str)>, DomainError> {
        let first_index = self
            .column_index(first)
            .ok_or_else(|| DomainError::unknown_column(first))?;
        let second_index = self
            .column_index(second)
            .ok_or_else(|| DomainError::unknown_column(second))?;

        Ok(self
            .rows
            .iter()
            .filter_map(|row| match (&row[first_index], &row[second_index]) {
                (Some(a), Some(b)) => Some((a.as_str(), b.as_str())),
                _ => None,
            })
            .collect())
    }

    /// Rewrites every column name.
    pub fn map_headers<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Removes a column. Returns false if it was not present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };

        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        true
    }

    /// Transforms every present answer in a column. Returns false if the column is absent.
    ///
    /// Missing answers are left untouched. Returning `None` from the
    /// transform turns the answer into a missing one.
    pub fn map_column<F>(&mut self, name: &str, mut transform: F) -> bool
    where
        F: FnMut(&str) -> Option<String>,
    {
        let Some(index) = self.column_index(name) else {
            return false;
        };

        for row in &mut self.rows {
            if let Some(value) = row[index].take() {
                row[index] = transform(&value);
            }
        }
        true
    }
}
