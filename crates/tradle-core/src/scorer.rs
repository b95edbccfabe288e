//! Per-hint mismatch scoring
//!
//! For a hint (guess g, reported distance r, optional direction):
//!
//! ```text
//! mismatch(c) = |d(g, c) - r| · penalty^k
//! ```
//!
//! where k counts the direction axes that country c fails. The guess itself is
//! scored like any other country: its base mismatch is r, and it fails a
//! direction check unless the tolerance admits it.

use crate::aggregate::Ranking;
use crate::config::TriangulationConfig;
use crate::geo::normalize_longitude_delta;
use crate::hint::Hint;
use crate::matrix::DistanceMatrix;
use crate::Result;
use tracing::debug;

/// Mismatch scores for one hint, aligned with the matrix country order
#[derive(Debug, Clone)]
pub struct MismatchVector<'m> {
    matrix: &'m DistanceMatrix,
    guess: String,
    scores: Vec<f64>,
}

impl<'m> MismatchVector<'m> {
    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn matrix(&self) -> &'m DistanceMatrix {
        self.matrix
    }

    /// Raw scores in matrix order
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn get(&self, country: &str) -> Option<f64> {
        self.matrix.index_of(country).map(|i| self.scores[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'m str, f64)> + '_ {
        self.matrix.countries().zip(self.scores.iter().copied())
    }

    /// Countries sorted by ascending mismatch
    pub fn ranked(&self) -> Ranking {
        Ranking::from_scores(self.iter())
    }
}

/// Score every reference country against one hint
pub fn score_hint<'m>(
    matrix: &'m DistanceMatrix,
    hint: &Hint,
    config: &TriangulationConfig,
) -> Result<MismatchVector<'m>> {
    config.validate()?;
    let guess_index = matrix.require(&hint.country)?;
    hint.validate_distance()?;

    let mut scores: Vec<f64> = matrix
        .row(guess_index)
        .iter()
        .map(|d| (d - hint.distance_km).abs())
        .collect();

    if let Some(direction) = hint.direction {
        let guess = matrix.centroids()[guess_index];
        let mut penalized = 0;

        for (score, centroid) in scores.iter_mut().zip(matrix.centroids()) {
            let lat_diff = centroid.latitude - guess.latitude;
            let lon_diff = normalize_longitude_delta(centroid.longitude - guess.longitude);
            let failed = direction.failed_components(lat_diff, lon_diff, config.tolerance_deg);
            if failed > 0 {
                *score = apply_penalty(*score, failed, config.penalty);
                penalized += 1;
            }
        }

        debug!(
            "Hint {} {:.0} km {}: {} of {} countries on the wrong side",
            hint.country,
            hint.distance_km,
            direction,
            penalized,
            matrix.len()
        );
    } else {
        debug!("Hint {} {:.0} km: distance only", hint.country, hint.distance_km);
    }

    Ok(MismatchVector {
        matrix,
        guess: hint.country.clone(),
        scores,
    })
}

/// Multiply once per failed axis, so an intercardinal miss on both axes costs
/// penalty². An infinite penalty excludes the country outright, even when its
/// distance mismatch is exactly zero.
fn apply_penalty(score: f64, failed: u32, penalty: f64) -> f64 {
    if penalty.is_infinite() {
        return f64::INFINITY;
    }
    (0..failed).fold(score, |acc, _| acc * penalty)
}

/// String-boundary variant of [`score_hint`].
///
/// Validates in order: country, direction, distance.
pub fn calculate_mismatch<'m>(
    matrix: &'m DistanceMatrix,
    country: &str,
    distance_km: f64,
    direction: Option<&str>,
    config: &TriangulationConfig,
) -> Result<MismatchVector<'m>> {
    matrix.require(country)?;
    let hint = Hint::parse(country, distance_km, direction)?;
    score_hint(matrix, &hint, config)
}

/// Score one hint and sort candidates, best first
pub fn rank_hint(matrix: &DistanceMatrix, hint: &Hint, config: &TriangulationConfig) -> Result<Ranking> {
    Ok(score_hint(matrix, hint, config)?.ranked())
}
