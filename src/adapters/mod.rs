//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `csv` - Survey responses from delimited files
//! - `plotting` - SVG biplots via `plotters`
//! - `report` - Console tables and JSON lines

pub mod csv;
pub mod plotting;
pub mod report;

pub use self::csv::CsvSurveySource;
pub use plotting::SvgBiplotRenderer;
pub use report::{ConsoleReportWriter, JsonReportWriter};
