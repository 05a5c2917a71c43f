//! Report adapters.
//!
//! - `ConsoleReportWriter` - Human-readable tables via `tabled`
//! - `JsonReportWriter` - One JSON object per line, for scripting

mod console_report_writer;
mod json_report_writer;

pub use console_report_writer::ConsoleReportWriter;
pub use json_report_writer::JsonReportWriter;
