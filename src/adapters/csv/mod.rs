//! CSV adapters.

mod csv_survey_source;

pub use csv_survey_source::CsvSurveySource;
