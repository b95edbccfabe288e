//! Puzzle hints: guessed country, reported distance, optional direction

use crate::direction::Direction;
use crate::{Result, TriangulationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    /// Name of the guessed country, exact match against the reference set
    pub country: String,
    /// Distance (km) from the guess to the hidden country, as reported
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Hint {
    pub fn new(country: impl Into<String>, distance_km: f64) -> Self {
        Self {
            country: country.into(),
            distance_km,
            direction: None,
        }
    }

    pub fn with_direction(country: impl Into<String>, distance_km: f64, direction: Direction) -> Self {
        Self {
            country: country.into(),
            distance_km,
            direction: Some(direction),
        }
    }

    /// Build a hint from puzzle text, validating the direction and distance
    pub fn parse(country: impl Into<String>, distance_km: f64, direction: Option<&str>) -> Result<Self> {
        let direction = direction.map(str::parse::<Direction>).transpose()?;
        let hint = Self {
            country: country.into(),
            distance_km,
            direction,
        };
        hint.validate_distance()?;
        Ok(hint)
    }

    /// Reported distances are non-negative and finite
    pub fn validate_distance(&self) -> Result<()> {
        if self.distance_km.is_finite() && self.distance_km >= 0.0 {
            Ok(())
        } else {
            Err(TriangulationError::InvalidDistance {
                country: self.country.clone(),
                distance_km: self.distance_km,
            })
        }
    }
}

impl From<(&str, f64)> for Hint {
    fn from((country, distance_km): (&str, f64)) -> Self {
        Hint::new(country, distance_km)
    }
}

impl TryFrom<(&str, f64, &str)> for Hint {
    type Error = TriangulationError;

    fn try_from((country, distance_km, direction): (&str, f64, &str)) -> Result<Self> {
        Hint::parse(country, distance_km, Some(direction))
    }
}
