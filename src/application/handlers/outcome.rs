//! Per-pair outcomes shared by the analysis handlers.

use crate::ports::PairNotice;

/// What happened to one pair of the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome<T> {
    Completed(T),
    Skipped(PairNotice),
    Failed(PairNotice),
}

impl<T> PairOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, PairOutcome::Completed(_))
    }

    /// Returns the finished result, if any.
    pub fn completed(&self) -> Option<&T> {
        match self {
            PairOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Tally of a run over the whole plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn of<T>(outcomes: &[PairOutcome<T>]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            match outcome {
                PairOutcome::Completed(_) => summary.completed += 1,
                PairOutcome::Skipped(_) => summary.skipped += 1,
                PairOutcome::Failed(_) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failed
    }
}
