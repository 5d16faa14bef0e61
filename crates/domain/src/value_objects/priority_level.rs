//! Priority level value object
//!
//! The 1-5 priority registry used across the triage pipeline.
//! Level 1 is the most urgent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Priority level of an analyzed email
///
/// Numeric mapping:
/// - 1: Critical
/// - 2: High
/// - 3: Medium
/// - 4: Low
/// - 5: Very Low
///
/// Levels 1-2 are considered urgent and gate immediate-attention and
/// auto-reply behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum PriorityLevel {
    /// Needs attention right now
    Critical,
    /// Urgent, should be handled today
    High,
    /// Normal workload
    Medium,
    /// Can wait
    Low,
    /// Background noise
    #[default]
    VeryLow,
}

impl PriorityLevel {
    /// Numeric value (1-5, 1 = most urgent)
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
            Self::VeryLow => 5,
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }

    /// Whether this level demands immediate attention
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }

    /// Build from a numeric value, clamping out-of-range input to the
    /// nearest bound
    #[must_use]
    pub const fn from_value_clamped(value: i64) -> Self {
        match value {
            i64::MIN..=1 => Self::Critical,
            2 => Self::High,
            3 => Self::Medium,
            4 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    /// Build from a raw priority score
    ///
    /// Rounds half-to-even (matching the scorer's documented rounding rule)
    /// before clamping to [1, 5]. Non-finite scores clamp to Very Low.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // rounded is checked to lie within (1, 5)
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() {
            return Self::VeryLow;
        }
        let rounded = score.round_ties_even();
        if rounded <= 1.0 {
            Self::Critical
        } else if rounded >= 5.0 {
            Self::VeryLow
        } else {
            Self::from_value_clamped(rounded as i64)
        }
    }

    /// All priority levels, most urgent first
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::Critical, Self::High, Self::Medium, Self::Low, Self::VeryLow]
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<PriorityLevel> for u8 {
    fn from(level: PriorityLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Critical),
            2 => Ok(Self::High),
            3 => Ok(Self::Medium),
            4 => Ok(Self::Low),
            5 => Ok(Self::VeryLow),
            other => Err(DomainError::InvalidPriorityLevel(i64::from(other))),
        }
    }
}

impl PartialOrd for PriorityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // More urgent = smaller number = greater priority
        other.value().cmp(&self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_map_one_to_five() {
        assert_eq!(PriorityLevel::Critical.value(), 1);
        assert_eq!(PriorityLevel::High.value(), 2);
        assert_eq!(PriorityLevel::Medium.value(), 3);
        assert_eq!(PriorityLevel::Low.value(), 4);
        assert_eq!(PriorityLevel::VeryLow.value(), 5);
    }

    #[test]
    fn names_match_registry() {
        assert_eq!(PriorityLevel::Critical.name(), "Critical");
        assert_eq!(PriorityLevel::High.name(), "High");
        assert_eq!(PriorityLevel::Medium.name(), "Medium");
        assert_eq!(PriorityLevel::Low.name(), "Low");
        assert_eq!(PriorityLevel::VeryLow.name(), "Very Low");
    }

    #[test]
    fn only_levels_one_and_two_are_urgent() {
        assert!(PriorityLevel::Critical.is_urgent());
        assert!(PriorityLevel::High.is_urgent());
        assert!(!PriorityLevel::Medium.is_urgent());
        assert!(!PriorityLevel::Low.is_urgent());
        assert!(!PriorityLevel::VeryLow.is_urgent());
    }

    #[test]
    fn from_value_clamped_clamps_both_ends() {
        assert_eq!(PriorityLevel::from_value_clamped(-3), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_value_clamped(0), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_value_clamped(3), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_value_clamped(9), PriorityLevel::VeryLow);
    }

    #[test]
    fn from_score_rounds_half_to_even() {
        // 2.5 rounds down to 2, 3.5 rounds up to 4
        assert_eq!(PriorityLevel::from_score(2.5), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(3.5), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_score(2.4), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(2.6), PriorityLevel::Medium);
    }

    #[test]
    fn from_score_clamps_to_bounds() {
        assert_eq!(PriorityLevel::from_score(0.2), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_score(-4.0), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_score(7.9), PriorityLevel::VeryLow);
    }

    #[test]
    fn from_score_handles_non_finite() {
        assert_eq!(PriorityLevel::from_score(f64::NAN), PriorityLevel::VeryLow);
        assert_eq!(PriorityLevel::from_score(f64::INFINITY), PriorityLevel::VeryLow);
        assert_eq!(
            PriorityLevel::from_score(f64::NEG_INFINITY),
            PriorityLevel::Critical
        );
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert!(PriorityLevel::try_from(0).is_err());
        assert!(PriorityLevel::try_from(6).is_err());
        assert_eq!(PriorityLevel::try_from(2).unwrap(), PriorityLevel::High);
    }

    #[test]
    fn ordering_puts_critical_highest() {
        let mut levels = vec![PriorityLevel::Low, PriorityLevel::Critical, PriorityLevel::Medium];
        levels.sort();
        levels.reverse();
        assert_eq!(
            levels,
            vec![PriorityLevel::Critical, PriorityLevel::Medium, PriorityLevel::Low]
        );
    }

    #[test]
    fn serde_round_trips_as_number() {
        let json = serde_json::to_string(&PriorityLevel::High).unwrap();
        assert_eq!(json, "2");

        let parsed: PriorityLevel = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, PriorityLevel::Low);
    }

    #[test]
    fn serde_rejects_out_of_range_number() {
        let result: Result<PriorityLevel, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[test]
    fn default_is_very_low() {
        assert_eq!(PriorityLevel::default(), PriorityLevel::VeryLow);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(format!("{}", PriorityLevel::VeryLow), "Very Low");
    }
}
