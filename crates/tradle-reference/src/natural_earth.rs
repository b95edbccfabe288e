//! GeoJSON country layers (Natural Earth `admin_0_countries` and similar)

use crate::centroid::{multi_polygon_centroid, polygon_centroid};
use crate::records::RecordSet;
use crate::{ReferenceError, Result};
use geojson::{Feature, GeoJson, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tradle_core::{Centroid, CountryRecord, GeoReferenceProvider};

/// Property keys tried, in order, for the country name
pub const DEFAULT_NAME_PROPERTIES: [&str; 3] = ["name", "NAME", "ADMIN"];

/// Reference set read from a GeoJSON FeatureCollection, one feature per country.
///
/// Point features are used as-is; Polygon and MultiPolygon features are
/// reduced to their area-weighted centroid.
#[derive(Debug, Clone)]
pub struct GeoJsonReference {
    path: PathBuf,
    name_properties: Vec<String>,
}

impl GeoJsonReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name_properties: DEFAULT_NAME_PROPERTIES.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Try `key` before the default name properties
    pub fn with_name_property(mut self, key: impl Into<String>) -> Self {
        self.name_properties.insert(0, key.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn feature_name(&self, feature: &Feature) -> Option<String> {
        self.name_properties
            .iter()
            .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

impl GeoReferenceProvider for GeoJsonReference {
    type Error = ReferenceError;

    fn provide_reference_set(&self) -> Result<Vec<CountryRecord>> {
        let path = self.path.as_path();
        info!("Loading country geometries from {:?}", path);

        let contents = std::fs::read_to_string(path)?;
        let features = match contents.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection.features,
            _ => return Err(ReferenceError::NotAFeatureCollection(path.to_path_buf())),
        };

        let mut set = RecordSet::default();
        for (i, feature) in features.iter().enumerate() {
            let name = self.feature_name(feature);
            let centroid = feature.geometry.as_ref().and_then(|g| geometry_centroid(&g.value));
            if let (Some(n), Some(c)) = (&name, &centroid) {
                debug!("{} centroid ({:.3}, {:.3})", n, c.latitude, c.longitude);
            }
            set.push(i, name, centroid);
        }
        set.finish(path)
    }
}

/// Representative point for the geometry kinds a country layer uses
pub fn geometry_centroid(value: &Value) -> Option<Centroid> {
    match value {
        Value::Point(position) if position.len() >= 2 => Some(Centroid::new(position[1], position[0])),
        Value::Polygon(rings) => polygon_centroid(rings),
        Value::MultiPolygon(polygons) => multi_polygon_centroid(polygons),
        _ => None,
    }
}
