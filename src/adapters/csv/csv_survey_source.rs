//! CSV Survey Source Adapter - Implementation of SurveySource.
//!
//! Reads a form export with the `csv` crate. Rows with too few or too many
//! fields are accepted and fitted to the header width.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::survey::SurveyDataset;
use crate::ports::{SourceError, SurveySource};

/// Survey responses stored in a delimited text file.
///
/// # Usage
///
/// ```rust,ignore
/// let source = CsvSurveySource::new("respostas.csv").with_delimiter(b';');
/// let dataset = source.load()?;
/// ```
#[derive(Debug, Clone)]
pub struct CsvSurveySource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSurveySource {
    /// Creates a comma-delimited source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<csv::Reader<File>, SourceError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::not_found(self.path.display().to_string()),
            _ => SourceError::io(format!("Failed to open {}: {}", self.path.display(), e)),
        })?;
        Ok(reader_for(file, self.delimiter))
    }

    fn header_of<R: Read>(&self, reader: &mut csv::Reader<R>) -> Result<Vec<String>, SourceError> {
        let header: Vec<String> = reader
            .headers()
            .map_err(map_csv_error)?
            .iter()
            .map(String::from)
            .collect();
        if header.is_empty() || header.iter().all(|h| h.is_empty()) {
            return Err(SourceError::Empty {
                path: self.path.display().to_string(),
            });
        }
        Ok(header)
    }
}

impl SurveySource for CsvSurveySource {
    fn read_header(&self) -> Result<Vec<String>, SourceError> {
        let mut reader = self.open()?;
        self.header_of(&mut reader)
    }

    fn load(&self) -> Result<SurveyDataset, SourceError> {
        let mut reader = self.open()?;
        let header = self.header_of(&mut reader)?;
        let width = header.len();
        let mut dataset = SurveyDataset::new(header);

        for result in reader.records() {
            let record = result.map_err(map_csv_error)?;
            if record.len() != width {
                debug!(
                    line = record.position().map(|p| p.line()).unwrap_or(0),
                    fields = record.len(),
                    expected = width,
                    "Fitting ragged record to header width"
                );
            }
            dataset.push_record(record.iter().collect::<Vec<&str>>());
        }

        info!(
            path = %self.path.display(),
            respondents = dataset.respondent_count(),
            columns = width,
            "Loaded survey responses"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn reader_for<R: Read>(input: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

fn map_csv_error(error: csv::Error) -> SourceError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    match error.kind() {
        csv::ErrorKind::Io(e) => SourceError::io(e.to_string()),
        _ => SourceError::Malformed {
            line,
            message: error.to_string(),
        },
    }
}
