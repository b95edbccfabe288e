//! Tradle Hint Triangulator
//!
//! Combines Tradle hints (a guessed country, the reported distance to the
//! hidden country, and an optional compass direction) into one ranked list
//! of candidate countries.
//!
//! # Scoring Model
//!
//! ```text
//! mismatch(h, c) = |d(guess_h, c) - distance_h| · penalty^k(h, c)
//! score(c)       = Σ_h mismatch(h, c)
//! ```
//!
//! | Term        | Description |
//! |-------------|-------------|
//! | d(a, b)     | Haversine distance between centroids (R = 6371 km) |
//! | distance_h  | Distance reported by the puzzle for hint h |
//! | k(h, c)     | Number of direction axes (0-2) that country c fails for hint h |
//! | penalty     | 2.0 when aggregating, ∞ for a standalone hint |
//!
//! Lower scores are more plausible. The distance matrix is built once per
//! reference set and shared read-only by every query.
//!
//! # Example
//!
//! ```
//! use tradle_core::{CountryRecord, Hint, StaticReference, Triangulator, TriangulationConfig};
//!
//! let reference = StaticReference::new(vec![
//!     CountryRecord::new("A", 0.0, 0.0),
//!     CountryRecord::new("B", 10.0, 0.0),
//!     CountryRecord::new("C", -10.0, 0.0),
//! ]);
//! let triangulator = Triangulator::from_provider(&reference, TriangulationConfig::default()).unwrap();
//!
//! let ranking = triangulator.best_guesses(&[Hint::parse("A", 1112.0, Some("N")).unwrap()]).unwrap();
//! assert_eq!(ranking.best().unwrap().country, "B");
//! ```

use thiserror::Error;

pub mod aggregate;
pub mod config;
pub mod direction;
pub mod geo;
pub mod hint;
pub mod matrix;
pub mod reference;
pub mod scorer;
pub mod triangulator;

pub use aggregate::{aggregate, RankedCandidate, Ranking};
pub use config::{TriangulationConfig, AGGREGATE_PENALTY, DEFAULT_TOLERANCE_DEG, STANDALONE_PENALTY};
pub use direction::Direction;
pub use geo::{haversine_km, normalize_longitude_delta, Centroid, EARTH_RADIUS_KM};
pub use hint::Hint;
pub use matrix::{CountryRecord, DistanceMatrix};
pub use reference::{GeoReferenceProvider, StaticReference};
pub use scorer::{calculate_mismatch, rank_hint, score_hint, MismatchVector};
pub use triangulator::Triangulator;

#[derive(Error, Debug)]
pub enum TriangulationError {
    #[error("Country not found in reference set: {name}")]
    UnknownCountry {
        name: String,
        /// Every valid country name, in reference order
        known: Vec<String>,
    },
    #[error("Invalid direction {0:?}: expected one of N, NE, E, SE, S, SW, W, NW")]
    InvalidDirection(String),
    #[error("Invalid distance for {country}: {distance_km} km")]
    InvalidDistance { country: String, distance_km: f64 },
    #[error("Duplicate country in reference set: {0}")]
    DuplicateCountry(String),
    #[error("Invalid centroid for {name}: ({latitude}, {longitude})")]
    InvalidCentroid {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Reference data unavailable: {0}")]
    InitializationFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, TriangulationError>;
