//! Triangulation tuning knobs

use crate::{Result, TriangulationError};
use serde::{Deserialize, Serialize};

/// Default direction tolerance in degrees
pub const DEFAULT_TOLERANCE_DEG: f64 = 0.000000000;

/// Penalty multiplier used when combining hints: wrong-direction countries are
/// down-weighted, so a noisy hint can still contribute
pub const AGGREGATE_PENALTY: f64 = 2.000000000;

/// Penalty multiplier for a single hint scored on its own (hard exclusion)
pub const STANDALONE_PENALTY: f64 = f64::INFINITY;

/// Scorer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationConfig {
    /// Width (degrees) of the band around the guess that counts as the wrong
    /// side of a direction. Applied to every axis alike.
    pub tolerance_deg: f64,
    /// Multiplier applied once per failed direction axis
    pub penalty: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            penalty: AGGREGATE_PENALTY,
        }
    }
}

impl TriangulationConfig {
    /// Profile for scoring one hint in isolation
    pub fn standalone() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            penalty: STANDALONE_PENALTY,
        }
    }

    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg;
        self
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_deg.is_finite() {
            return Err(TriangulationError::InvalidConfig(format!(
                "tolerance must be finite, got {}",
                self.tolerance_deg
            )));
        }
        if self.penalty.is_nan() || self.penalty < 0.0 {
            return Err(TriangulationError::InvalidConfig(format!(
                "penalty must be non-negative, got {}",
                self.penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let agg = TriangulationConfig::default();
        assert_eq!(agg.penalty, 2.0);
        assert_eq!(agg.tolerance_deg, 0.0);

        let solo = TriangulationConfig::standalone();
        assert!(solo.penalty.is_infinite());
        assert!(solo.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TriangulationConfig::default().with_penalty(f64::NAN).validate().is_err());
        assert!(TriangulationConfig::default().with_penalty(-1.0).validate().is_err());
        assert!(TriangulationConfig::default().with_tolerance(f64::INFINITY).validate().is_err());
        assert!(TriangulationConfig::default().with_tolerance(2.5).validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: TriangulationConfig = serde_json::from_str(r#"{"tolerance_deg": 1.5}"#).unwrap();
        assert_eq!(config.tolerance_deg, 1.5);
        assert_eq!(config.penalty, AGGREGATE_PENALTY);
    }
}
