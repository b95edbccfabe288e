//! All-pairs great-circle distance matrix over the reference countries

use crate::geo::Centroid;
use crate::{Result, TriangulationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// A reference country and its representative centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub centroid: Centroid,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            centroid: Centroid::new(latitude, longitude),
        }
    }
}

/// Symmetric, zero-diagonal distance table (km), immutable once built.
///
/// Country order is the order of the records it was built from; rankings
/// use it to break ties.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    names: Vec<String>,
    centroids: Vec<Centroid>,
    index: HashMap<String, usize>,
    /// Row-major n×n
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix from a reference set: n·(n-1)/2 haversine evaluations,
    /// mirrored across the diagonal.
    pub fn build(records: impl IntoIterator<Item = CountryRecord>) -> Result<Self> {
        let mut names = Vec::new();
        let mut centroids = Vec::new();
        let mut index = HashMap::new();

        for record in records {
            if !record.centroid.is_valid() {
                return Err(TriangulationError::InvalidCentroid {
                    name: record.name,
                    latitude: record.centroid.latitude,
                    longitude: record.centroid.longitude,
                });
            }
            if index.contains_key(&record.name) {
                return Err(TriangulationError::DuplicateCountry(record.name));
            }
            index.insert(record.name.clone(), names.len());
            names.push(record.name);
            centroids.push(record.centroid);
        }

        let n = names.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = centroids[i].distance_km(&centroids[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        info!(
            "Built distance matrix for {} countries ({} pairs)",
            n,
            n * n.saturating_sub(1) / 2
        );

        Ok(Self {
            names,
            centroids,
            index,
            distances,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Country names in matrix order
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index_of(&self, country: &str) -> Option<usize> {
        self.index.get(country).copied()
    }

    /// Index lookup that reports the full valid set on a miss
    pub fn require(&self, country: &str) -> Result<usize> {
        self.index_of(country)
            .ok_or_else(|| TriangulationError::UnknownCountry {
                name: country.to_string(),
                known: self.names.clone(),
            })
    }

    pub fn centroid(&self, country: &str) -> Option<Centroid> {
        self.index_of(country).map(|i| self.centroids[i])
    }

    /// Centroids in matrix order
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn distance(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.distances[i * self.len() + j])
    }

    /// Distances from one country to every country, in matrix order
    pub fn row(&self, index: usize) -> &[f64] {
        let n = self.len();
        &self.distances[index * n..(index + 1) * n]
    }
}
