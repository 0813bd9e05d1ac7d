//! # Riskgrid Core
//!
//! The deterministic risk-matrix engine.
//!
//! A risk matrix assigns a qualitative [`RiskLevel`] to every
//! (likelihood, impact) cell of an N×N grid owned by a risk-context
//! ("konteks"). This crate owns everything that can be computed without a
//! network:
//!
//! - [`score`]: the pure likelihood × impact score function
//! - [`band`]: validated score-band configurations and level derivation
//! - [`matrix`]: the working/persisted grid state with dirty tracking
//! - [`editor`]: the view/edit/confirm-discard lifecycle state machine
//! - [`reconcile`]: bulk create/delete planning and outcome classification
//!
//! ## Design Principles
//!
//! - All keyed state uses `BTreeMap` for deterministic ordering
//! - Integer arithmetic only (band cut points use ceiling division)
//! - No panics: fallible operations return `Result`

pub mod band;
pub mod editor;
pub mod grid;
pub mod level;
pub mod matrix;
pub mod reconcile;

pub use band::{Band, BandConfig, BandError};
pub use editor::{EditorMode, MatrixEditor};
pub use grid::{score, CellKey, GridSize, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use level::RiskLevel;
pub use matrix::{MatrixError, MatrixRecord, MatrixState};
pub use reconcile::{
    bulk_create_plan, delete_plan, CellAssignment, DeleteOutcome, DeleteReport, RecordId,
};
