//! # Grid Primitives
//!
//! The matrix axes: grid size, cell keys, and the score function.
//!
//! A risk matrix is an N×N grid whose axes are the likelihood and impact
//! levels, each an integer in `[1, N]`. The grid size is owned by the parent
//! risk-context and is immutable once cells exist (changing it would orphan
//! existing cell records).

use crate::matrix::MatrixError;
use serde::{Deserialize, Serialize};

/// Smallest supported grid. N = 1 cannot host four non-empty default bands.
pub const MIN_GRID_SIZE: u8 = 2;

/// Largest supported grid. Computational bound; observed sizes are 3, 4, 5.
pub const MAX_GRID_SIZE: u8 = 10;

// =============================================================================
// GRID SIZE
// =============================================================================

/// Validated side length of a square risk matrix.
///
/// Construction enforces `MIN_GRID_SIZE ..= MAX_GRID_SIZE`, so every
/// `GridSize` in circulation describes a grid the engine can fully populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridSize(u8);

impl GridSize {
    /// Create a validated grid size.
    pub fn new(n: u8) -> Result<Self, MatrixError> {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(MatrixError::InvalidGridSize(n))
        }
    }

    /// The side length N.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of cells in the grid (N²).
    #[must_use]
    pub fn cell_count(self) -> u16 {
        u16::from(self.0) * u16::from(self.0)
    }

    /// Maximum attainable score (N²).
    #[must_use]
    pub fn max_score(self) -> u16 {
        self.cell_count()
    }

    /// Whether the axis value lies within `[1, N]`.
    #[must_use]
    pub fn contains_axis(self, value: u8) -> bool {
        (1..=self.0).contains(&value)
    }

    /// All cell keys of the grid in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellKey> {
        let n = self.0;
        (1..=n).flat_map(move |likelihood| (1..=n).map(move |impact| CellKey::new(likelihood, impact)))
    }
}

impl TryFrom<u8> for GridSize {
    type Error = MatrixError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> u8 {
        size.0
    }
}

// =============================================================================
// CELL KEY
// =============================================================================

/// Composite key of one matrix cell: (likelihood level, impact level).
///
/// The derived `Ord` gives row-major order (likelihood outer, impact inner),
/// so a `BTreeMap<CellKey, _>` iterates the grid in a stable, deterministic
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub likelihood: u8,
    pub impact: u8,
}

impl CellKey {
    /// Create a cell key. Range checking is the grid's job, not the key's.
    #[must_use]
    pub fn new(likelihood: u8, impact: u8) -> Self {
        Self { likelihood, impact }
    }

    /// The cell's score.
    #[must_use]
    pub fn score(self) -> u16 {
        score(self.likelihood, self.impact)
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.likelihood, self.impact)
    }
}

// =============================================================================
// SCORE FUNCTION
// =============================================================================

/// Score of a (likelihood, impact) pair.
///
/// Pure, total, deterministic: `score = likelihood × impact`, range
/// `[1, N²]` for grid-constrained inputs.
#[must_use]
pub fn score(likelihood: u8, impact: u8) -> u16 {
    u16::from(likelihood) * u16::from(impact)
}

// =============================================================================
// TESTS
// =============================================================================
