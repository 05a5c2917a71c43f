//! AssociationHandler - Chi-square independence test for every plan pair.

use tracing::{debug, info, warn};

use crate::application::handlers::{PairOutcome, RunSummary};
use crate::application::AppError;
use crate::domain::analysis::{AnalysisPair, AnalysisPlan, ChiSquareTest, ContingencyTable};
use crate::domain::foundation::SignificanceLevel;
use crate::domain::survey::SurveyDataset;
use crate::ports::{AssociationReport, PairNotice, ReportWriter};

/// Command to test association over a plan.
#[derive(Debug, Clone)]
pub struct RunAssociationCommand {
    pub plan: AnalysisPlan,
    pub significance_level: SignificanceLevel,
}

impl RunAssociationCommand {
    pub fn new(plan: AnalysisPlan) -> Self {
        Self {
            plan,
            significance_level: SignificanceLevel::default(),
        }
    }

    pub fn with_significance_level(mut self, alpha: SignificanceLevel) -> Self {
        self.significance_level = alpha;
        self
    }
}

/// Handler for chi-square association runs.
#[derive(Debug, Default)]
pub struct AssociationHandler;

impl AssociationHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        cmd: &RunAssociationCommand,
        dataset: &SurveyDataset,
        report: &mut dyn ReportWriter,
    ) -> Result<Vec<PairOutcome<AssociationReport>>, AppError> {
        let mut outcomes = Vec::with_capacity(cmd.plan.len());

        for pair in cmd.plan.iter() {
            let outcome = test_pair(pair, dataset, cmd.significance_level);
            match &outcome {
                PairOutcome::Completed(result) => report.association(result)?,
                PairOutcome::Skipped(notice) | PairOutcome::Failed(notice) => {
                    report.notice(notice)?
                }
            }
            outcomes.push(outcome);
        }
        report.finish()?;

        let summary = RunSummary::of(&outcomes);
        info!(
            tested = summary.completed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Association tests finished"
        );
        Ok(outcomes)
    }
}

fn test_pair(
    pair: &AnalysisPair,
    dataset: &SurveyDataset,
    alpha: SignificanceLevel,
) -> PairOutcome<AssociationReport> {
    let table = match ContingencyTable::cross_tabulate(dataset, &pair.row, &pair.column) {
        Ok(table) => table,
        Err(e) => {
            warn!(row = %pair.row, column = %pair.column, error = %e, "Skipping pair");
            return PairOutcome::Skipped(PairNotice::skipped(pair, e.message, None));
        }
    };

    match ChiSquareTest::of(&table) {
        Ok(test) => {
            debug!(
                row = %pair.row,
                column = %pair.column,
                statistic = test.statistic,
                p_value = test.p_value,
                "Tested association"
            );
            PairOutcome::Completed(AssociationReport::new(pair, &table, &test, alpha))
        }
        Err(e) if e.is_skippable() => {
            let shape = e.table_shape().unwrap_or_else(|| table.shape());
            warn!(
                row = %pair.row,
                column = %pair.column,
                rows = shape.0,
                columns = shape.1,
                "Table is invalid for testing"
            );
            PairOutcome::Skipped(PairNotice::skipped(pair, "table is invalid for testing", Some(shape)))
        }
        Err(e) => PairOutcome::Failed(PairNotice::failed(pair, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::report::ConsoleReportWriter;

    fn dataset() -> SurveyDataset {
        let mut records = Vec::new();
        for _ in 0..20 {
            records.push(vec!["a", "x", "só"]);
            records.push(vec!["b", "y", "só"]);
        }
        for _ in 0..10 {
            records.push(vec!["a", "y", "só"]);
            records.push(vec!["b", "x", "só"]);
        }
        SurveyDataset::from_records(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            records,
        )
    }

    #[test]
    fn tests_each_pair_and_prints_verdicts() {
        let plan = AnalysisPlan::new(vec![
            AnalysisPair::new("A", "B"),
            AnalysisPair::new("A", "C"),
            AnalysisPair::new("A", "Z"),
        ]);
        let mut writer = ConsoleReportWriter::new(Vec::new());

        let outcomes = AssociationHandler::new()
            .handle(&RunAssociationCommand::new(plan), &dataset(), &mut writer)
            .unwrap();

        assert_eq!(RunSummary::of(&outcomes), RunSummary { completed: 1, skipped: 2, failed: 0 });

        let report = outcomes[0].completed().unwrap();
        assert!((report.statistic - 5.4).abs() < 1e-9);
        assert!(report.significant);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.contains("χ² = 5.400, gl = 1, valor-p = 0.0201"));
        assert!(text.contains("table is invalid for testing (formato da tabela: 2 x 1)"));
        assert!(text.contains("Column 'Z' not found in dataset"));
    }

    #[test]
    fn significance_level_is_configurable() {
        let plan = AnalysisPlan::new(vec![AnalysisPair::new("A", "B")]);
        let cmd = RunAssociationCommand::new(plan)
            .with_significance_level(SignificanceLevel::try_new(0.01).unwrap());
        let mut writer = ConsoleReportWriter::new(Vec::new());

        let outcomes = AssociationHandler::new()
            .handle(&cmd, &dataset(), &mut writer)
            .unwrap();

        assert!(!outcomes[0].completed().unwrap().significant);
    }
}
