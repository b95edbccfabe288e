//! Reference data capability
//!
//! The triangulator only needs a finite list of uniquely named countries with
//! one centroid each. Where that list comes from (bundled fixture, JSON file,
//! Natural Earth geometries) is the provider's business.

use crate::matrix::CountryRecord;
use std::convert::Infallible;

/// Supplies the reference set once, at initialization
pub trait GeoReferenceProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn provide_reference_set(&self) -> Result<Vec<CountryRecord>, Self::Error>;
}

/// In-memory reference set, e.g. a test fixture
#[derive(Debug, Clone, Default)]
pub struct StaticReference {
    records: Vec<CountryRecord>,
}

impl StaticReference {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }

    /// From (name, latitude, longitude) triples
    pub fn from_triples<'a>(triples: impl IntoIterator<Item = (&'a str, f64, f64)>) -> Self {
        Self::new(
            triples
                .into_iter()
                .map(|(name, lat, lon)| CountryRecord::new(name, lat, lon))
                .collect(),
        )
    }
}

impl GeoReferenceProvider for StaticReference {
    type Error = Infallible;

    fn provide_reference_set(&self) -> Result<Vec<CountryRecord>, Self::Error> {
        Ok(self.records.clone())
    }
}
