//! InspectColumnsHandler - Lists the raw column names of the input file.
//!
//! Useful before writing a plan: shows the header exactly as exported,
//! before trimming and renaming.

use std::sync::Arc;
use tracing::info;

use crate::application::AppError;
use crate::ports::{ReportWriter, SurveySource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectColumnsResult {
    pub columns: Vec<String>,
}

pub struct InspectColumnsHandler {
    source: Arc<dyn SurveySource>,
}

impl InspectColumnsHandler {
    pub fn new(source: Arc<dyn SurveySource>) -> Self {
        Self { source }
    }

    pub fn handle(&self, report: &mut dyn ReportWriter) -> Result<InspectColumnsResult, AppError> {
        let columns = self.source.read_header()?;
        info!(
            source = %self.source.describe(),
            columns = columns.len(),
            "Read input header"
        );

        report.columns(&columns)?;
        report.finish()?;

        Ok(InspectColumnsResult { columns })
    }
}
