//! Flat JSON centroid files

use crate::records::RecordSet;
use crate::{ReferenceError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tradle_core::{Centroid, CountryRecord, GeoReferenceProvider};

/// Raw country record from JSON
#[derive(Debug, Deserialize)]
struct RawCountry {
    #[serde(alias = "country")]
    name: Option<String>,
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon", alias = "lng")]
    longitude: Option<f64>,
}

/// Reference set stored as JSON, either a bare array of records or an object
/// with a `countries` array:
///
/// ```json
/// [{"name": "Thailand", "latitude": 15.1, "longitude": 101.0}]
/// ```
#[derive(Debug, Clone)]
pub struct JsonReference {
    path: PathBuf,
}

impl JsonReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GeoReferenceProvider for JsonReference {
    type Error = ReferenceError;

    fn provide_reference_set(&self) -> Result<Vec<CountryRecord>> {
        load_countries(&self.path)
    }
}

/// Load country centroids from a JSON file
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<CountryRecord>> {
    let path = path.as_ref();
    info!("Loading reference countries from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    let countries: Vec<RawCountry> = if let Some(list) = raw.get("countries") {
        serde_json::from_value(list.clone())?
    } else if raw.is_array() {
        serde_json::from_value(raw)?
    } else {
        return Err(ReferenceError::UnexpectedLayout(path.to_path_buf()));
    };

    let mut set = RecordSet::default();
    for (i, country) in countries.into_iter().enumerate() {
        let centroid = match (country.latitude, country.longitude) {
            (Some(lat), Some(lon)) => Some(Centroid::new(lat, lon)),
            _ => None,
        };
        set.push(i, country.name, centroid);
    }
    set.finish(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_array() {
        let file = write_json(
            r#"[
                {"name": "Thailand", "latitude": 15.1, "longitude": 101.0},
                {"name": "Eritrea", "lat": 15.4, "lon": 38.8},
                {"name": "No Coords"}
            ]"#,
        );

        let records = load_countries(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Thailand");
        assert_eq!(records[1].centroid, Centroid::new(15.4, 38.8));
    }

    #[test]
    fn test_load_countries_object() {
        let file = write_json(r#"{"countries": [{"country": "Chile", "latitude": -37.7, "lng": -71.4}]}"#);

        let records = JsonReference::new(file.path()).provide_reference_set().unwrap();
        assert_eq!(records, vec![CountryRecord::new("Chile", -37.7, -71.4)]);
    }

    #[test]
    fn test_unexpected_layout() {
        let file = write_json(r#"{"type": "FeatureCollection", "features": []}"#);
        assert!(matches!(
            load_countries(file.path()),
            Err(ReferenceError::UnexpectedLayout(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let reference = JsonReference::new("/nonexistent/countries.json");
        assert!(matches!(reference.provide_reference_set(), Err(ReferenceError::Io(_))));
    }
}
