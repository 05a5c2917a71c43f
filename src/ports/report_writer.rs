//! Report Writer Port - Presenting analysis results.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use super::LegendEntry;
use crate::domain::analysis::{cramers_v_for, AnalysisPair, ChiSquareTest, ContingencyTable};
use crate::domain::foundation::{Percentage, SignificanceLevel};

/// Summary of one rendered correspondence analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrespondenceReport {
    pub pair: AnalysisPair,
    /// (rows, columns) after empty margins were dropped.
    pub shape: (usize, usize),
    pub eigenvalues: Vec<f64>,
    pub explained_inertia: Vec<Percentage>,
    pub total_inertia: f64,
    pub legend_title: String,
    pub legend: Vec<LegendEntry>,
    pub chart_path: PathBuf,
    pub legend_path: PathBuf,
}

/// Result of one chi-square association test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationReport {
    pub pair: AnalysisPair,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub expected: Vec<Vec<f64>>,
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    pub continuity_corrected: bool,
    /// Bias-corrected Cramér's V. `None` when undefined.
    pub cramers_v: Option<f64>,
    pub significance_level: SignificanceLevel,
    pub significant: bool,
}

impl AssociationReport {
    /// Collects a finished test into a report.
    pub fn new(
        pair: &AnalysisPair,
        table: &ContingencyTable,
        test: &ChiSquareTest,
        alpha: SignificanceLevel,
    ) -> Self {
        let table = table.without_empty_margins();
        Self {
            pair: pair.clone(),
            row_labels: table.row_labels().to_vec(),
            column_labels: table.column_labels().to_vec(),
            expected: test.expected.clone(),
            statistic: test.statistic,
            degrees_of_freedom: test.degrees_of_freedom,
            p_value: test.p_value,
            continuity_corrected: test.continuity_corrected,
            cramers_v: cramers_v_for(test),
            significance_level: alpha,
            significant: test.is_significant(alpha),
        }
    }

    /// One-line conclusion of the test.
    pub fn verdict(&self) -> &'static str {
        if self.significant {
            "associação estatisticamente significativa"
        } else {
            "sem evidência estatística de associação"
        }
    }
}

/// Whether a pair was left out or broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Skipped,
    Failed,
}

/// A pair that produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairNotice {
    pub pair: AnalysisPair,
    pub kind: NoticeKind,
    pub reason: String,
    /// Table shape, when the table could be built.
    pub shape: Option<(usize, usize)>,
}

impl PairNotice {
    pub fn skipped(pair: &AnalysisPair, reason: impl Into<String>, shape: Option<(usize, usize)>) -> Self {
        Self {
            pair: pair.clone(),
            kind: NoticeKind::Skipped,
            reason: reason.into(),
            shape,
        }
    }

    pub fn failed(pair: &AnalysisPair, reason: impl Into<String>) -> Self {
        Self {
            pair: pair.clone(),
            kind: NoticeKind::Failed,
            reason: reason.into(),
            shape: None,
        }
    }
}

/// Port for presenting results to the user.
///
/// Writers are stateful (they own an output stream), so methods take
/// `&mut self`.
pub trait ReportWriter {
    /// Lists the raw column names of the input.
    fn columns(&mut self, columns: &[String]) -> Result<(), ReportError>;

    /// Reports a rendered correspondence analysis.
    fn correspondence(&mut self, report: &CorrespondenceReport) -> Result<(), ReportError>;

    /// Reports a chi-square association test.
    fn association(&mut self, report: &AssociationReport) -> Result<(), ReportError>;

    /// Reports a pair that was skipped or failed.
    fn notice(&mut self, notice: &PairNotice) -> Result<(), ReportError>;

    /// Flushes anything buffered.
    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Errors that can occur while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
