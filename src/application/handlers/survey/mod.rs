//! Survey handlers.
//!
//! Reading the input file, before any analysis runs.

mod inspect_columns;
mod load_survey;

pub use inspect_columns::{InspectColumnsHandler, InspectColumnsResult};
pub use load_survey::LoadSurveyHandler;
