//! Session facade: build the distance matrix once, answer many queries

use crate::aggregate::{aggregate, Ranking};
use crate::config::TriangulationConfig;
use crate::hint::Hint;
use crate::matrix::DistanceMatrix;
use crate::reference::GeoReferenceProvider;
use crate::scorer::{score_hint, MismatchVector};
use crate::{Result, TriangulationError};
use tracing::info;

/// Owns the immutable distance matrix and the query configuration.
///
/// Queries only read the matrix, so a `Triangulator` can sit behind an `Arc`
/// and serve independent queries from several threads.
#[derive(Debug, Clone)]
pub struct Triangulator {
    matrix: DistanceMatrix,
    config: TriangulationConfig,
}

impl Triangulator {
    /// Load the reference set and build the matrix. Provider failures are
    /// fatal and not retried.
    pub fn from_provider<P: GeoReferenceProvider>(provider: &P, config: TriangulationConfig) -> Result<Self> {
        config.validate()?;
        let records = provider
            .provide_reference_set()
            .map_err(|e| TriangulationError::InitializationFailure(Box::new(e)))?;
        info!("Loaded {} reference countries", records.len());
        Ok(Self {
            matrix: DistanceMatrix::build(records)?,
            config,
        })
    }

    pub fn new(matrix: DistanceMatrix, config: TriangulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { matrix, config })
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Rank every country against all hints
    pub fn best_guesses(&self, hints: &[Hint]) -> Result<Ranking> {
        aggregate(&self.matrix, hints, &self.config)
    }

    /// Unsorted mismatch vector for one hint, using the session config
    pub fn mismatch(&self, hint: &Hint) -> Result<MismatchVector<'_>> {
        score_hint(&self.matrix, hint, &self.config)
    }

    /// One hint on its own: wrong-direction countries are hard-excluded
    pub fn rank_hint(&self, hint: &Hint) -> Result<Ranking> {
        let standalone = TriangulationConfig::standalone().with_tolerance(self.config.tolerance_deg);
        Ok(score_hint(&self.matrix, hint, &standalone)?.ranked())
    }
}
