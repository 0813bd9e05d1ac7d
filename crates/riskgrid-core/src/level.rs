//! # Risk Level
//!
//! The qualitative severity classification of a matrix cell.
//!
//! Levels are ordered by severity (`Low < Medium < High < Critical`) and
//! serialize to the backend's UPPERCASE wire form.

use serde::{Deserialize, Serialize};

/// Qualitative risk classification of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// All levels in ascending severity order.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// The next level in the fixed edit cycle.
    ///
    /// Click-to-cycle order: Low → Medium → High → Critical → Low.
    #[must_use]
    pub fn cycle_next(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::Medium,
            RiskLevel::Medium => RiskLevel::High,
            RiskLevel::High => RiskLevel::Critical,
            RiskLevel::Critical => RiskLevel::Low,
        }
    }

    /// Wire-format name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn cycle_wraps_after_four_steps() {
        let mut level = RiskLevel::Low;
        for _ in 0..4 {
            level = level.cycle_next();
        }
        assert_eq!(level, RiskLevel::Low);
    }

    #[test]
    fn cycle_visits_every_level() {
        let mut seen = Vec::new();
        let mut level = RiskLevel::Low;
        for _ in 0..4 {
            seen.push(level);
            level = level.cycle_next();
        }
        assert_eq!(seen, RiskLevel::ALL);
    }

    #[test]
    fn wire_format_roundtrip() {
        for level in RiskLevel::ALL {
            let json = serde_json::to_string(&level).expect("serialize");
            assert_eq!(json, format!("\"{}\"", level.as_str()));
            let back: RiskLevel = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, level);
        }
    }
}
