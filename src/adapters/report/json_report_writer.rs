//! JSON Report Writer - Implementation of ReportWriter emitting JSON lines.

use serde::Serialize;
use std::io::{self, Write};

use crate::ports::{AssociationReport, CorrespondenceReport, PairNotice, ReportError, ReportWriter};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Columns { columns: &'a [String] },
    Correspondence(&'a CorrespondenceReport),
    Association(&'a AssociationReport),
    Notice(&'a PairNotice),
}

/// Writes one JSON object per report, newline-delimited.
#[derive(Debug)]
pub struct JsonReportWriter<W: Write> {
    out: W,
}

impl JsonReportWriter<io::Stdout> {
    /// Creates a writer on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, record: &Record<'_>) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonReportWriter<W> {
    fn columns(&mut self, columns: &[String]) -> Result<(), ReportError> {
        self.emit(&Record::Columns { columns })
    }

    fn correspondence(&mut self, report: &CorrespondenceReport) -> Result<(), ReportError> {
        self.emit(&Record::Correspondence(report))
    }

    fn association(&mut self, report: &AssociationReport) -> Result<(), ReportError> {
        self.emit(&Record::Association(report))
    }

    fn notice(&mut self, notice: &PairNotice) -> Result<(), ReportError> {
        self.emit(&Record::Notice(notice))
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}
