//! # Matrix State
//!
//! The in-memory risk-level grid for one risk-context.
//!
//! Two full grids are held side by side: the **persisted** grid mirrors the
//! backend-confirmed cell records, the **working** grid is what edit mode
//! mutates. Both are always fully populated (all N² cells) once
//! initialized; a cell is never "unset". Divergence between the two is
//! tracked with a dirty flag.

use crate::band::BandConfig;
use crate::grid::{CellKey, GridSize};
use crate::level::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors of the matrix engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Grid size outside the supported range.
    #[error("grid size {0} outside supported range [2, 10]")]
    InvalidGridSize(u8),

    /// Cell coordinates outside `[1, N]²`.
    #[error("cell ({likelihood}, {impact}) outside {size}×{size} grid")]
    CellOutOfRange {
        likelihood: u8,
        impact: u8,
        size: u8,
    },

    /// Cell mutation attempted outside edit mode.
    #[error("matrix is not in edit mode")]
    NotEditing,

    /// Discard confirmation handled outside the confirm-discard state.
    #[error("no discard confirmation is pending")]
    NoPendingDiscard,

    /// A band configuration built for a different grid size.
    #[error("band configuration is for a {got}×{got} grid, matrix is {expected}×{expected}")]
    GridSizeMismatch { expected: u8, got: u8 },
}

// =============================================================================
// PERSISTED RECORD
// =============================================================================

/// A backend-owned persisted matrix cell.
///
/// Field names follow the REST wire format of the konteks backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRecord {
    pub id: u64,
    pub konteks_id: u64,
    pub likelihood_level: u8,
    pub impact_level: u8,
    pub risk_level: RiskLevel,
}

impl MatrixRecord {
    /// The cell this record describes.
    #[must_use]
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.likelihood_level, self.impact_level)
    }
}

// =============================================================================
// MATRIX STATE
// =============================================================================

/// Working + persisted risk-level grids with dirty tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixState {
    size: GridSize,
    working: BTreeMap<CellKey, RiskLevel>,
    persisted: BTreeMap<CellKey, RiskLevel>,
    dirty: bool,
}

impl MatrixState {
    /// Initialize a grid with no persisted records yet.
    ///
    /// Every cell is seeded from the default banding for the grid size.
    #[must_use]
    pub fn initialize_empty(size: GridSize) -> Self {
        let grid = BandConfig::defaults(size).assignments();
        Self {
            size,
            working: grid.clone(),
            persisted: grid,
            dirty: false,
        }
    }

    /// Reset both grids to mirror the given record set.
    ///
    /// Cells absent from `records` fall back to the default-band derivation,
    /// so the grid stays fully populated even with partial backend data.
    /// Records outside the grid are skipped (the record set is
    /// backend-owned; one stray row must not take down the whole view).
    /// Clears the dirty flag.
    pub fn populate_from_records(&mut self, records: &[MatrixRecord]) {
        let mut grid = BandConfig::defaults(self.size).assignments();
        for record in records {
            let cell = record.cell();
            if self.size.contains_axis(cell.likelihood) && self.size.contains_axis(cell.impact) {
                grid.insert(cell, record.risk_level);
            }
        }
        self.working = grid.clone();
        self.persisted = grid;
        self.dirty = false;
    }

    /// The grid size.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Whether the working grid has diverged from the persisted baseline.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// The working grid's level for a cell.
    pub fn get_cell(&self, likelihood: u8, impact: u8) -> Result<RiskLevel, MatrixError> {
        let cell = self.checked_cell(likelihood, impact)?;
        // Both grids are fully populated from construction onward.
        Ok(self
            .working
            .get(&cell)
            .copied()
            .unwrap_or(RiskLevel::Low))
    }

    /// The persisted baseline's level for a cell.
    pub fn get_persisted_cell(&self, likelihood: u8, impact: u8) -> Result<RiskLevel, MatrixError> {
        let cell = self.checked_cell(likelihood, impact)?;
        Ok(self
            .persisted
            .get(&cell)
            .copied()
            .unwrap_or(RiskLevel::Low))
    }

    /// Set a working-grid cell and mark the state dirty.
    ///
    /// Mode guarding is the editor's job; this state layer only checks
    /// coordinates.
    pub fn set_cell(
        &mut self,
        likelihood: u8,
        impact: u8,
        level: RiskLevel,
    ) -> Result<(), MatrixError> {
        let cell = self.checked_cell(likelihood, impact)?;
        self.working.insert(cell, level);
        self.dirty = true;
        Ok(())
    }

    /// Advance a cell to the next level in the fixed cycle.
    pub fn cycle_cell(&mut self, likelihood: u8, impact: u8) -> Result<RiskLevel, MatrixError> {
        let current = self.get_cell(likelihood, impact)?;
        let next = current.cycle_next();
        self.set_cell(likelihood, impact, next)?;
        Ok(next)
    }

    /// Reset the working grid from the persisted baseline.
    ///
    /// Idempotent: a second call is a no-op.
    pub fn discard_changes(&mut self) {
        self.working = self.persisted.clone();
        self.dirty = false;
    }

    /// Adopt the working grid as the new persisted baseline.
    ///
    /// Called after the backend confirms a successful save.
    pub fn commit_saved(&mut self) {
        self.persisted = self.working.clone();
        self.dirty = false;
    }

    /// The working grid in row-major order.
    pub fn working_cells(&self) -> impl Iterator<Item = (CellKey, RiskLevel)> + '_ {
        self.working.iter().map(|(cell, level)| (*cell, *level))
    }

    fn checked_cell(&self, likelihood: u8, impact: u8) -> Result<CellKey, MatrixError> {
        if self.size.contains_axis(likelihood) && self.size.contains_axis(impact) {
            Ok(CellKey::new(likelihood, impact))
        } else {
            Err(MatrixError::CellOutOfRange {
                likelihood,
                impact,
                size: self.size.get(),
            })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn size(n: u8) -> GridSize {
        GridSize::new(n).expect("valid size")
    }

    fn record(id: u64, likelihood: u8, impact: u8, level: RiskLevel) -> MatrixRecord {
        MatrixRecord {
            id,
            konteks_id: 7,
            likelihood_level: likelihood,
            impact_level: impact,
            risk_level: level,
        }
    }

    #[test]
    fn initialize_empty_matches_default_bands() {
        let state = MatrixState::initialize_empty(size(5));
        let config = BandConfig::defaults(size(5));

        for cell in size(5).cells() {
            let level = state
                .get_cell(cell.likelihood, cell.impact)
                .expect("in range");
            assert_eq!(level, config.level_for(cell.score()));
        }
        assert!(!state.has_unsaved_changes());
    }

    #[test]
    fn populate_from_empty_records_falls_back_to_defaults() {
        let mut state = MatrixState::initialize_empty(size(4));
        state.populate_from_records(&[]);

        let config = BandConfig::defaults(size(4));
        for cell in size(4).cells() {
            let level = state
                .get_cell(cell.likelihood, cell.impact)
                .expect("in range");
            assert_eq!(level, config.level_for(cell.score()));
        }
    }

    #[test]
    fn populate_round_trips_record_assignments() {
        let records = vec![
            record(1, 1, 1, RiskLevel::Critical),
            record(2, 2, 3, RiskLevel::Low),
            record(3, 3, 3, RiskLevel::Medium),
        ];
        let mut state = MatrixState::initialize_empty(size(3));
        state.populate_from_records(&records);

        assert_eq!(state.get_cell(1, 1), Ok(RiskLevel::Critical));
        assert_eq!(state.get_cell(2, 3), Ok(RiskLevel::Low));
        assert_eq!(state.get_cell(3, 3), Ok(RiskLevel::Medium));
        assert!(!state.has_unsaved_changes());
    }

    #[test]
    fn out_of_range_records_are_skipped() {
        let mut state = MatrixState::initialize_empty(size(3));
        state.populate_from_records(&[record(1, 9, 9, RiskLevel::Critical)]);

        // Grid is still the default derivation, and fully populated.
        let config = BandConfig::defaults(size(3));
        for cell in size(3).cells() {
            let level = state
                .get_cell(cell.likelihood, cell.impact)
                .expect("in range");
            assert_eq!(level, config.level_for(cell.score()));
        }
    }

    #[test]
    fn set_cell_marks_dirty_and_leaves_baseline() {
        let mut state = MatrixState::initialize_empty(size(3));
        state
            .set_cell(1, 1, RiskLevel::Critical)
            .expect("in range");

        assert!(state.has_unsaved_changes());
        assert_eq!(state.get_cell(1, 1), Ok(RiskLevel::Critical));
        assert_eq!(state.get_persisted_cell(1, 1), Ok(RiskLevel::Low));
    }

    #[test]
    fn cycle_cell_full_cycle_returns_to_start_and_stays_dirty() {
        let mut state = MatrixState::initialize_empty(size(5));
        let start = state.get_cell(1, 1).expect("in range");
        assert_eq!(start, RiskLevel::Low);

        for step in 0..4 {
            state.cycle_cell(1, 1).expect("in range");
            assert!(state.has_unsaved_changes(), "dirty after step {step}");
        }
        assert_eq!(state.get_cell(1, 1), Ok(RiskLevel::Low));
    }

    #[test]
    fn discard_changes_is_idempotent() {
        let mut state = MatrixState::initialize_empty(size(3));
        state
            .set_cell(2, 2, RiskLevel::Critical)
            .expect("in range");

        state.discard_changes();
        let after_first = state.clone();
        state.discard_changes();

        assert_eq!(state, after_first);
        assert!(!state.has_unsaved_changes());
        assert_eq!(state.get_cell(2, 2), state.get_persisted_cell(2, 2));
    }

    #[test]
    fn commit_saved_adopts_working_as_baseline() {
        let mut state = MatrixState::initialize_empty(size(3));
        state
            .set_cell(1, 2, RiskLevel::High)
            .expect("in range");
        state.commit_saved();

        assert!(!state.has_unsaved_changes());
        assert_eq!(state.get_persisted_cell(1, 2), Ok(RiskLevel::High));

        // Discard after commit keeps the saved value.
        state.discard_changes();
        assert_eq!(state.get_cell(1, 2), Ok(RiskLevel::High));
    }

    #[test]
    fn out_of_range_cell_access_is_an_error() {
        let state = MatrixState::initialize_empty(size(3));
        assert_eq!(
            state.get_cell(0, 1),
            Err(MatrixError::CellOutOfRange {
                likelihood: 0,
                impact: 1,
                size: 3,
            })
        );
        assert!(state.get_cell(4, 1).is_err());
    }

    proptest! {
        #[test]
        fn grid_is_always_fully_populated(
            n in 2u8..=10,
            records in proptest::collection::vec(
                (1u64..1000, 1u8..=10, 1u8..=10, 0usize..4),
                0..20,
            ),
        ) {
            let records: Vec<_> = records
                .into_iter()
                .map(|(id, l, i, lvl)| record(id, l, i, RiskLevel::ALL[lvl]))
                .collect();

            let mut state = MatrixState::initialize_empty(size(n));
            state.populate_from_records(&records);

            prop_assert_eq!(state.working_cells().count(), usize::from(size(n).cell_count()));
            for cell in size(n).cells() {
                prop_assert!(state.get_cell(cell.likelihood, cell.impact).is_ok());
            }
        }
    }
}
