//! LoadSurveyHandler - Reads and cleans the survey once for every analysis.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::AppError;
use crate::domain::survey::{SurveyDataset, SurveyPreparer};
use crate::ports::SurveySource;

pub struct LoadSurveyHandler {
    source: Arc<dyn SurveySource>,
    preparer: SurveyPreparer,
}

impl LoadSurveyHandler {
    pub fn new(source: Arc<dyn SurveySource>, preparer: SurveyPreparer) -> Self {
        Self { source, preparer }
    }

    /// Loads the raw responses and runs the cleaning pipeline.
    pub fn handle(&self) -> Result<SurveyDataset, AppError> {
        let raw = self.source.load()?;
        let dataset = self.preparer.prepare(raw);

        if dataset.is_empty() {
            warn!(source = %self.source.describe(), "Survey has no responses");
        }
        info!(
            source = %self.source.describe(),
            respondents = dataset.respondent_count(),
            columns = dataset.columns().len(),
            "Prepared survey"
        );
        Ok(dataset)
    }
}
