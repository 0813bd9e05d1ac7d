//! # Edit Lifecycle
//!
//! The view / edit / confirm-discard state machine wrapped around a
//! [`MatrixState`].
//!
//! The original admin surface left mode guarding to its callers; here the
//! editor carries the guard itself: cell mutation is only possible in edit
//! mode, and leaving edit mode with unsaved changes always goes through an
//! explicit confirmation step — never a silent discard.
//!
//! ```text
//! VIEW --enter_edit--> EDIT --cycle_cell--> EDIT(dirty) --save--> VIEW
//! EDIT(dirty) --request_exit--> CONFIRM_DISCARD --confirm--> VIEW
//! CONFIRM_DISCARD --cancel--> EDIT(dirty)
//! ```
//!
//! Initial state is `View`; no state is terminal.

use crate::band::BandConfig;
use crate::grid::CellKey;
use crate::level::RiskLevel;
use crate::matrix::{MatrixError, MatrixRecord, MatrixState};
use std::collections::BTreeMap;

/// Operating mode of the matrix editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Read-only rendering of the working grid.
    #[default]
    View,
    /// Manual per-cell editing is allowed.
    Edit,
    /// An exit from a dirty edit session awaits explicit confirmation.
    ConfirmDiscard,
}

/// The matrix edit lifecycle around one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEditor {
    state: MatrixState,
    mode: EditorMode,
}

impl MatrixEditor {
    /// Wrap a matrix state; the editor starts in view mode.
    #[must_use]
    pub fn new(state: MatrixState) -> Self {
        Self {
            state,
            mode: EditorMode::View,
        }
    }

    /// Current operating mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// The wrapped grid state.
    #[must_use]
    pub fn state(&self) -> &MatrixState {
        &self.state
    }

    /// Replace the grids from a freshly fetched record set.
    ///
    /// Re-fetching authoritative state drops any pending edit session: the
    /// editor returns to view mode with a clean grid.
    pub fn refresh_from_records(&mut self, records: &[MatrixRecord]) {
        self.state.populate_from_records(records);
        self.mode = EditorMode::View;
    }

    /// Switch from view mode into edit mode.
    ///
    /// A no-op in edit mode. In confirm-discard the pending confirmation
    /// must be resolved first; the mode is left unchanged.
    pub fn enter_edit(&mut self) {
        if self.mode == EditorMode::View {
            self.mode = EditorMode::Edit;
        }
    }

    /// Request to leave edit mode.
    ///
    /// With no unsaved changes this exits straight to view mode. With
    /// unsaved changes it moves to the confirm-discard state instead of
    /// silently dropping them; the caller must follow up with
    /// [`confirm_discard`](Self::confirm_discard) or
    /// [`cancel_discard`](Self::cancel_discard). Returns the resulting mode.
    pub fn request_exit(&mut self) -> EditorMode {
        if self.mode == EditorMode::Edit {
            self.mode = if self.state.has_unsaved_changes() {
                EditorMode::ConfirmDiscard
            } else {
                EditorMode::View
            };
        }
        self.mode
    }

    /// Confirm the pending discard: drop unsaved changes, return to view.
    pub fn confirm_discard(&mut self) -> Result<(), MatrixError> {
        if self.mode != EditorMode::ConfirmDiscard {
            return Err(MatrixError::NoPendingDiscard);
        }
        self.state.discard_changes();
        self.mode = EditorMode::View;
        Ok(())
    }

    /// Cancel the pending discard: back to edit mode, changes intact.
    pub fn cancel_discard(&mut self) -> Result<(), MatrixError> {
        if self.mode != EditorMode::ConfirmDiscard {
            return Err(MatrixError::NoPendingDiscard);
        }
        self.mode = EditorMode::Edit;
        Ok(())
    }

    /// Set one working-grid cell. Edit mode only.
    pub fn set_cell(
        &mut self,
        likelihood: u8,
        impact: u8,
        level: RiskLevel,
    ) -> Result<(), MatrixError> {
        if self.mode != EditorMode::Edit {
            return Err(MatrixError::NotEditing);
        }
        self.state.set_cell(likelihood, impact, level)
    }

    /// Cycle one working-grid cell to its next level. Edit mode only.
    pub fn cycle_cell(&mut self, likelihood: u8, impact: u8) -> Result<RiskLevel, MatrixError> {
        if self.mode != EditorMode::Edit {
            return Err(MatrixError::NotEditing);
        }
        self.state.cycle_cell(likelihood, impact)
    }

    /// Record a backend-confirmed save: the working grid becomes the new
    /// persisted baseline and the editor returns to view mode.
    pub fn save_succeeded(&mut self) -> Result<(), MatrixError> {
        if self.mode != EditorMode::Edit {
            return Err(MatrixError::NotEditing);
        }
        self.state.commit_saved();
        self.mode = EditorMode::View;
        Ok(())
    }

    /// Render a full-grid replacement preview from a candidate banding.
    ///
    /// Touches neither the working nor the persisted grid; committing the
    /// preview goes through bulk reconciliation against the backend.
    pub fn preview(
        &self,
        config: &BandConfig,
    ) -> Result<BTreeMap<CellKey, RiskLevel>, MatrixError> {
        if config.size() != self.state.size() {
            return Err(MatrixError::GridSizeMismatch {
                expected: self.state.size().get(),
                got: config.size().get(),
            });
        }
        Ok(config.assignments())
    }
}

// =============================================================================
// TESTS
// =============================================================================
