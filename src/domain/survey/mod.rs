//! Survey Module - Loading-independent representation and cleaning of survey answers.
//!
//! # Components
//!
//! - `SurveyDataset` - Respondent rows with optional categorical answers
//! - `QuestionCatalog` - Full question text to short identifier mapping
//! - `standardize_multiselect` - Canonical form for checkbox answers
//! - `SurveyPreparer` - The cleaning pipeline shared by every analysis

mod dataset;
mod multiselect;
mod preparer;
mod question_catalog;

pub use dataset::{is_missing, SurveyDataset, MISSING_MARKERS};
pub use multiselect::{standardize_multiselect, MULTISELECT_SEPARATOR};
pub use preparer::SurveyPreparer;
pub use question_catalog::{normalize_header, QuestionCatalog, TIMESTAMP_COLUMN};
