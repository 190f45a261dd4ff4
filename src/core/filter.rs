// LogHealth - core/filter.rs
//
// Status filtering and tallying over a result set.
// Core layer: pure logic, no I/O.

use crate::core::model::{AnalysisResult, Status};

/// Keep only results whose status matches `status`, ignoring case.
///
/// An unknown label simply matches nothing. Never fails.
pub fn filter_by_status(results: Vec<AnalysisResult>, status: &str) -> Vec<AnalysisResult> {
    results
        .into_iter()
        .filter(|r| r.status.matches_label(status))
        .collect()
}

/// Per-status totals for a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub ok: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.ok + self.failed
    }
}

pub fn count_by_status(results: &[AnalysisResult]) -> StatusCounts {
    results
        .iter()
        .fold(StatusCounts::default(), |mut acc, r| {
            match r.status {
                Status::Ok => acc.ok += 1,
                Status::Failed => acc.failed += 1,
            }
            acc
        })
}
