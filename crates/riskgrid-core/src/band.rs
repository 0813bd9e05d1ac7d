//! # Banding Engine
//!
//! Score-range bands: ordered, non-overlapping, gap-free ranges over
//! `[1, N²]`, each mapped to one [`RiskLevel`].
//!
//! A [`BandConfig`] can only be constructed through validation, so every
//! configuration in circulation covers each score exactly once. Deriving a
//! full grid from an unvalidated band list is impossible by construction.

use crate::grid::{CellKey, GridSize};
use crate::level::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Validation failures of a band configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandError {
    /// A band's range is inverted (min > max).
    #[error("band {level} has inverted range [{min}, {max}]")]
    InvertedRange { level: RiskLevel, min: u16, max: u16 },

    /// A band's range extends outside `[1, N²]`.
    #[error("band {level} range [{min}, {max}] lies outside [1, {max_score}]")]
    OutOfRange {
        level: RiskLevel,
        min: u16,
        max: u16,
        max_score: u16,
    },

    /// Two bands both claim the given score.
    #[error("score {score} is covered by more than one band")]
    Overlap { score: u16 },

    /// No band covers the given score.
    #[error("score {score} is not covered by any band")]
    Gap { score: u16 },

    /// The configuration has no bands at all.
    #[error("band configuration is empty")]
    Empty,
}

// =============================================================================
// BAND
// =============================================================================

/// One contiguous score range mapped to a risk level.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub level: RiskLevel,
    pub min: u16,
    pub max: u16,
}

impl Band {
    /// Create a band. Validation happens at [`BandConfig::new`].
    #[must_use]
    pub fn new(level: RiskLevel, min: u16, max: u16) -> Self {
        Self { level, min, max }
    }

    /// Whether the score lies within this band.
    #[must_use]
    pub fn contains(&self, score: u16) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

// =============================================================================
// BAND CONFIGURATION
// =============================================================================

/// A validated banding configuration for one grid size.
///
/// Invariant: every integer score in `[1, N²]` is covered by exactly one
/// band, every band lies within `[1, N²]`, and `min <= max` for each.
/// Deliberately not `Deserialize`: the only way in is [`BandConfig::new`],
/// so an unvalidated configuration cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandConfig {
    size: GridSize,
    bands: Vec<Band>,
}

impl BandConfig {
    /// Validate and adopt a band list for the given grid size.
    ///
    /// Rejects gaps, overlaps, inverted ranges, and ranges outside
    /// `[1, N²]`. An invalid configuration is a caller error and is never
    /// silently clamped.
    pub fn new(bands: Vec<Band>, size: GridSize) -> Result<Self, BandError> {
        if bands.is_empty() {
            return Err(BandError::Empty);
        }

        let max_score = size.max_score();
        for band in &bands {
            if band.min > band.max {
                return Err(BandError::InvertedRange {
                    level: band.level,
                    min: band.min,
                    max: band.max,
                });
            }
            if band.min < 1 || band.max > max_score {
                return Err(BandError::OutOfRange {
                    level: band.level,
                    min: band.min,
                    max: band.max,
                    max_score,
                });
            }
        }

        // Exactly-once coverage of every score in [1, N²].
        for score in 1..=max_score {
            match bands.iter().filter(|b| b.contains(score)).count() {
                0 => return Err(BandError::Gap { score }),
                1 => {}
                _ => return Err(BandError::Overlap { score }),
            }
        }

        Ok(Self { size, bands })
    }

    /// The default proportional banding for a grid size.
    ///
    /// Cut points over `[1, N²]`: LOW ends at ceil(0.2·N²), MEDIUM at
    /// ceil(0.4·N²), HIGH at ceil(0.7·N²), CRITICAL at N². Gives the usual
    /// heat-map shape (more LOW/MEDIUM area than CRITICAL) without the
    /// operator hand-entering ranges. For N=5: LOW=[1,5], MEDIUM=[6,10],
    /// HIGH=[11,18], CRITICAL=[19,25].
    #[must_use]
    pub fn defaults(size: GridSize) -> Self {
        let n2 = size.max_score();
        // Integer ceiling of (tenths · N²) / 10.
        let cut = |tenths: u16| (tenths * n2).div_ceil(10);

        let low_max = cut(2);
        let medium_max = cut(4);
        let high_max = cut(7);

        let bands = vec![
            Band::new(RiskLevel::Low, 1, low_max),
            Band::new(RiskLevel::Medium, low_max + 1, medium_max),
            Band::new(RiskLevel::High, medium_max + 1, high_max),
            Band::new(RiskLevel::Critical, high_max + 1, n2),
        ];

        Self { size, bands }
    }

    /// The grid size this configuration was validated against.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// The bands in declaration order.
    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// The level of the first band containing the score.
    ///
    /// Total: in-range scores always match exactly one band (constructor
    /// invariant). Out-of-range scores fall back to `Low`, a documented
    /// defensive default rather than a panic path.
    #[must_use]
    pub fn level_for(&self, score: u16) -> RiskLevel {
        self.bands
            .iter()
            .find(|b| b.contains(score))
            .map(|b| b.level)
            .unwrap_or(RiskLevel::Low)
    }

    /// Derive the full per-cell assignment for the whole grid.
    ///
    /// Returns all N² cells in row-major order.
    #[must_use]
    pub fn assignments(&self) -> BTreeMap<CellKey, RiskLevel> {
        self.size
            .cells()
            .map(|cell| (cell, self.level_for(cell.score())))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
