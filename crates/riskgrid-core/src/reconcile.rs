//! # Bulk Reconciliation
//!
//! Planning the backend calls that materialize or clear a whole matrix,
//! and classifying the aggregate outcome of a concurrent delete batch.
//!
//! The plans are pure: this module never talks to the network. The client
//! crate executes a plan and feeds the completion counts back into
//! [`DeleteReport`] for classification.

use crate::level::RiskLevel;
use crate::matrix::{MatrixRecord, MatrixState};
use serde::{Deserialize, Serialize};

/// Identity of one persisted matrix record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

/// One row of a bulk-create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellAssignment {
    pub likelihood_level: u8,
    pub impact_level: u8,
    pub risk_level: RiskLevel,
}

/// The full set of assignments to submit in one bulk create.
///
/// Emits exactly N² entries from the working grid, in row-major order.
/// Only valid against a risk-context with no existing matrix; the backend
/// rejects bulk creation onto a non-empty matrix, and the client checks the
/// emptiness precondition before issuing the call.
#[must_use]
pub fn bulk_create_plan(state: &MatrixState) -> Vec<CellAssignment> {
    state
        .working_cells()
        .map(|(cell, level)| CellAssignment {
            likelihood_level: cell.likelihood,
            impact_level: cell.impact,
            risk_level: level,
        })
        .collect()
}

/// The full set of record ids to delete for "clear matrix".
#[must_use]
pub fn delete_plan(records: &[MatrixRecord]) -> Vec<RecordId> {
    records.iter().map(|r| RecordId(r.id)).collect()
}

// =============================================================================
// DELETE OUTCOME
// =============================================================================

/// Classification of a completed delete batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Every delete succeeded; local state may be treated as empty.
    Cleared,
    /// Some deletes succeeded and some failed. No assumption about which
    /// subset went through is safe; the only correct follow-up is an
    /// authoritative re-fetch.
    Indeterminate { succeeded: usize, failed: usize },
    /// Every delete failed; the backend state is unchanged and the
    /// operation is retryable as a whole.
    Failed,
}

/// Completion counts of a delete batch.
///
/// The deletes fire concurrently with no ordering between them; the batch
/// is done when `completed() == total`, and only then is the outcome
/// classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteReport {
    total: usize,
    failed: usize,
}

impl DeleteReport {
    /// Start a report for a batch of the given size.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { total, failed: 0 }
    }

    /// Build a report directly from final counts.
    #[must_use]
    pub fn from_counts(total: usize, failed: usize) -> Self {
        Self {
            total,
            failed: failed.min(total),
        }
    }

    /// Record one failed delete.
    pub fn record_failure(&mut self) {
        self.failed = self.failed.saturating_add(1).min(self.total);
    }

    /// Batch size.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of failed deletes.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Classify the aggregate outcome.
    ///
    /// An empty batch is trivially `Cleared`.
    #[must_use]
    pub fn outcome(&self) -> DeleteOutcome {
        if self.failed == 0 {
            DeleteOutcome::Cleared
        } else if self.failed == self.total {
            DeleteOutcome::Failed
        } else {
            DeleteOutcome::Indeterminate {
                succeeded: self.total - self.failed,
                failed: self.failed,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellKey, GridSize};

    fn state(n: u8) -> MatrixState {
        MatrixState::initialize_empty(GridSize::new(n).expect("valid size"))
    }

    #[test]
    fn bulk_plan_covers_grid_in_row_major_order() {
        let plan = bulk_create_plan(&state(5));
        assert_eq!(plan.len(), 25);
        assert_eq!((plan[0].likelihood_level, plan[0].impact_level), (1, 1));
        assert_eq!((plan[24].likelihood_level, plan[24].impact_level), (5, 5));

        let keys: Vec<_> = plan
            .iter()
            .map(|a| CellKey::new(a.likelihood_level, a.impact_level))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn bulk_plan_reflects_working_edits() {
        let mut st = state(3);
        st.set_cell(2, 2, RiskLevel::Critical).expect("in range");

        let plan = bulk_create_plan(&st);
        let edited = plan
            .iter()
            .find(|a| a.likelihood_level == 2 && a.impact_level == 2)
            .expect("cell present");
        assert_eq!(edited.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn delete_plan_lists_every_record_id() {
        let records = vec![
            MatrixRecord {
                id: 10,
                konteks_id: 1,
                likelihood_level: 1,
                impact_level: 1,
                risk_level: RiskLevel::Low,
            },
            MatrixRecord {
                id: 11,
                konteks_id: 1,
                likelihood_level: 1,
                impact_level: 2,
                risk_level: RiskLevel::Low,
            },
        ];
        assert_eq!(delete_plan(&records), vec![RecordId(10), RecordId(11)]);
    }

    #[test]
    fn all_successes_clear() {
        assert_eq!(DeleteReport::from_counts(25, 0).outcome(), DeleteOutcome::Cleared);
    }

    #[test]
    fn partial_failure_is_indeterminate_not_partially_cleared() {
        // 25 deletes, 3 fail: the caller must re-fetch, never assume 22 gone.
        assert_eq!(
            DeleteReport::from_counts(25, 3).outcome(),
            DeleteOutcome::Indeterminate {
                succeeded: 22,
                failed: 3,
            }
        );
    }

    #[test]
    fn total_failure_is_failed() {
        assert_eq!(DeleteReport::from_counts(9, 9).outcome(), DeleteOutcome::Failed);
    }

    #[test]
    fn empty_batch_is_trivially_cleared() {
        assert_eq!(DeleteReport::new(0).outcome(), DeleteOutcome::Cleared);
    }

    #[test]
    fn incremental_failure_recording_matches_counts() {
        let mut report = DeleteReport::new(4);
        report.record_failure();
        report.record_failure();
        assert_eq!(
            report.outcome(),
            DeleteOutcome::Indeterminate {
                succeeded: 2,
                failed: 2,
            }
        );
    }

    #[test]
    fn assignment_serializes_in_wire_format() {
        let assignment = CellAssignment {
            likelihood_level: 3,
            impact_level: 4,
            risk_level: RiskLevel::High,
        };
        let json = serde_json::to_value(&assignment).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "likelihoodLevel": 3,
                "impactLevel": 4,
                "riskLevel": "HIGH",
            })
        );
    }
}
