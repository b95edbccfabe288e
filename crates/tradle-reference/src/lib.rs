//! Country Reference Providers
//!
//! File-backed implementations of [`GeoReferenceProvider`] for the Tradle
//! triangulator:
//!
//! - [`JsonReference`]: flat `{name, latitude, longitude}` records
//! - [`GeoJsonReference`]: a FeatureCollection of country geometries
//!   (Natural Earth style), reduced to one centroid per country
//!
//! Unusable records are skipped and counted rather than failing the load; a
//! file that yields no usable country at all is an error.

use std::path::PathBuf;
use thiserror::Error;

pub mod centroid;
pub mod json_file;
pub mod natural_earth;
mod records;

pub use json_file::JsonReference;
pub use natural_earth::GeoJsonReference;
pub use tradle_core::GeoReferenceProvider;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Expected a GeoJSON FeatureCollection in {0:?}")]
    NotAFeatureCollection(PathBuf),
    #[error("Unrecognised reference layout in {0:?}: expected an array or a \"countries\" list")]
    UnexpectedLayout(PathBuf),
    #[error("No usable countries in {0:?}")]
    Empty(PathBuf),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
