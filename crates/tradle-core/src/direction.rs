//! Compass directions reported by Tradle

use crate::TriangulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cardinal or intercardinal direction from a guess towards the hidden country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }

    pub fn points_north(&self) -> bool {
        matches!(self, Direction::N | Direction::NE | Direction::NW)
    }

    pub fn points_south(&self) -> bool {
        matches!(self, Direction::S | Direction::SE | Direction::SW)
    }

    pub fn points_east(&self) -> bool {
        matches!(self, Direction::E | Direction::NE | Direction::SE)
    }

    pub fn points_west(&self) -> bool {
        matches!(self, Direction::W | Direction::NW | Direction::SW)
    }

    /// Count the axis checks a candidate fails, given its offset from the guess.
    ///
    /// `lon_diff` must already be wrapped into (-180, 180]. A candidate that
    /// sits within `tolerance` degrees of the guess on a constrained axis fails
    /// that axis. Intercardinal directions check both axes independently.
    pub fn failed_components(&self, lat_diff: f64, lon_diff: f64, tolerance: f64) -> u32 {
        let mut failed = 0;
        if self.points_north() && lat_diff <= tolerance {
            failed += 1;
        }
        if self.points_south() && lat_diff >= -tolerance {
            failed += 1;
        }
        if self.points_east() && lon_diff <= tolerance {
            failed += 1;
        }
        if self.points_west() && lon_diff >= -tolerance {
            failed += 1;
        }
        failed
    }
}

impl FromStr for Direction {
    type Err = TriangulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| TriangulationError::InvalidDirection(s.to_string()))
    }
}

impl TryFrom<String> for Direction {
    type Error = TriangulationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
