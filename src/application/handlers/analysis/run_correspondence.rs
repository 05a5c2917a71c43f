//! CorrespondenceHandler - Fits and renders a biplot for every plan pair.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::handlers::{PairOutcome, RunSummary};
use crate::application::AppError;
use crate::domain::analysis::{
    AnalysisPair, AnalysisPlan, ContingencyTable, CorrespondenceAnalysis, PLANE_COMPONENTS,
};
use crate::domain::survey::SurveyDataset;
use crate::ports::{BiplotRenderer, BiplotSpec, CorrespondenceReport, PairNotice, ReportWriter};

/// Command to run correspondence analysis over a plan.
#[derive(Debug, Clone)]
pub struct RunCorrespondenceCommand {
    pub plan: AnalysisPlan,
    /// Upper bound on fitted axes. The plot always shows the first two.
    pub max_components: usize,
}

impl RunCorrespondenceCommand {
    pub fn new(plan: AnalysisPlan) -> Self {
        Self {
            plan,
            max_components: PLANE_COMPONENTS,
        }
    }
}

/// Handler for correspondence analysis runs.
pub struct CorrespondenceHandler {
    renderer: Arc<dyn BiplotRenderer>,
}

impl CorrespondenceHandler {
    pub fn new(renderer: Arc<dyn BiplotRenderer>) -> Self {
        Self { renderer }
    }

    /// Runs every pair of the plan.
    ///
    /// Only report-writing failures abort the run; problems with a single
    /// pair are reported and the run moves on.
    pub fn handle(
        &self,
        cmd: &RunCorrespondenceCommand,
        dataset: &SurveyDataset,
        report: &mut dyn ReportWriter,
    ) -> Result<Vec<PairOutcome<CorrespondenceReport>>, AppError> {
        let mut outcomes = Vec::with_capacity(cmd.plan.len());

        for pair in cmd.plan.iter() {
            info!(row = %pair.row, column = %pair.column, "Generating correspondence analysis");
            let outcome = self.run_pair(pair, dataset, cmd.max_components);
            match &outcome {
                PairOutcome::Completed(result) => report.correspondence(result)?,
                PairOutcome::Skipped(notice) | PairOutcome::Failed(notice) => {
                    report.notice(notice)?
                }
            }
            outcomes.push(outcome);
        }
        report.finish()?;

        let summary = RunSummary::of(&outcomes);
        info!(
            completed = summary.completed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Correspondence analysis finished"
        );
        Ok(outcomes)
    }

    fn run_pair(
        &self,
        pair: &AnalysisPair,
        dataset: &SurveyDataset,
        max_components: usize,
    ) -> PairOutcome<CorrespondenceReport> {
        let table = match ContingencyTable::cross_tabulate(dataset, &pair.row, &pair.column) {
            Ok(table) => table,
            Err(e) => {
                warn!(row = %pair.row, column = %pair.column, error = %e, "Skipping pair");
                return PairOutcome::Skipped(PairNotice::skipped(pair, e.message, None));
            }
        };

        let analysis = match CorrespondenceAnalysis::fit(&table, max_components) {
            Ok(analysis) => analysis,
            Err(e) if e.is_skippable() => {
                let shape = e
                    .table_shape()
                    .unwrap_or_else(|| table.without_empty_margins().shape());
                warn!(
                    row = %pair.row,
                    column = %pair.column,
                    rows = shape.0,
                    columns = shape.1,
                    "Table is degenerate or empty after cleaning; cannot compute a 2D correspondence analysis"
                );
                return PairOutcome::Skipped(PairNotice::skipped(pair, e.message, Some(shape)));
            }
            Err(e) => {
                error!(row = %pair.row, column = %pair.column, error = %e, "Correspondence analysis failed");
                return PairOutcome::Failed(PairNotice::failed(pair, e.to_string()));
            }
        };

        let spec = BiplotSpec::from_analysis(pair, &analysis);
        let rendered = match self.renderer.render(&spec) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(row = %pair.row, column = %pair.column, error = %e, "Rendering biplot failed");
                return PairOutcome::Failed(PairNotice::failed(pair, e.to_string()));
            }
        };

        PairOutcome::Completed(CorrespondenceReport {
            pair: pair.clone(),
            shape: analysis.table().shape(),
            eigenvalues: analysis.eigenvalues().to_vec(),
            explained_inertia: analysis.explained_inertia(),
            total_inertia: analysis.total_inertia(),
            legend_title: spec.legend_title,
            legend: spec.legend,
            chart_path: rendered.chart_path,
            legend_path: rendered.legend_path,
        })
    }
}
