//! Combining hints into one ranked candidate list

use crate::config::TriangulationConfig;
use crate::hint::Hint;
use crate::matrix::DistanceMatrix;
use crate::scorer::score_hint;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A candidate country and its (aggregate) mismatch score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub country: String,
    pub score: f64,
}

impl RankedCandidate {
    /// Hard-excluded by an infinite direction penalty
    pub fn is_excluded(&self) -> bool {
        self.score.is_infinite()
    }
}

/// Candidates ordered by ascending score, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    candidates: Vec<RankedCandidate>,
}

impl Ranking {
    /// Drop undefined (NaN) scores and stable-sort the rest ascending, so ties
    /// keep their input order.
    pub fn from_scores<'a>(scores: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut candidates: Vec<RankedCandidate> = scores
            .into_iter()
            .filter(|(_, score)| !score.is_nan())
            .map(|(country, score)| RankedCandidate {
                country: country.to_string(),
                score,
            })
            .collect();
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn best(&self) -> Option<&RankedCandidate> {
        self.candidates.first()
    }

    pub fn top(&self, n: usize) -> &[RankedCandidate] {
        &self.candidates[..n.min(self.candidates.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedCandidate> {
        self.candidates.iter()
    }

    /// Candidates with a finite score
    pub fn plausible(&self) -> impl Iterator<Item = &RankedCandidate> {
        self.candidates.iter().filter(|c| !c.is_excluded())
    }

    /// Zero-based rank of a country, if it was ranked
    pub fn position(&self, country: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.country == country)
    }

    pub fn into_vec(self) -> Vec<RankedCandidate> {
        self.candidates
    }
}

impl IntoIterator for Ranking {
    type Item = RankedCandidate;
    type IntoIter = std::vec::IntoIter<RankedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

/// Score every hint, sum the mismatch vectors per country and rank the totals.
///
/// The first failing hint aborts the query. No hints yields an empty ranking.
pub fn aggregate(matrix: &DistanceMatrix, hints: &[Hint], config: &TriangulationConfig) -> Result<Ranking> {
    let mut totals: Option<Vec<f64>> = None;

    for hint in hints {
        let mismatch = score_hint(matrix, hint, config)?;
        debug!(
            "Folding hint {} ({} countries)",
            mismatch.guess(),
            mismatch.scores().len()
        );
        totals = Some(match totals {
            None => mismatch.scores().to_vec(),
            Some(mut acc) => {
                for (total, score) in acc.iter_mut().zip(mismatch.scores()) {
                    *total += score;
                }
                acc
            }
        });
    }

    let Some(totals) = totals else {
        return Ok(Ranking::default());
    };

    let ranking = Ranking::from_scores(matrix.countries().zip(totals));

    info!(
        "Ranked {} candidates from {} hints (best: {})",
        ranking.len(),
        hints.len(),
        ranking
            .best()
            .map(|c| format!("{} {:.1}", c.country, c.score))
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::matrix::CountryRecord;
    use crate::TriangulationError;

    fn cross() -> DistanceMatrix {
        DistanceMatrix::build(vec![
            CountryRecord::new("A", 0.0, 0.0),
            CountryRecord::new("B", 10.0, 0.0),
            CountryRecord::new("C", -10.0, 0.0),
            CountryRecord::new("D", 0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_sum_of_vectors() {
        let matrix = cross();
        let config = TriangulationConfig::default();
        let hints = vec![
            Hint::new("A", 1000.0),
            Hint::with_direction("D", 1500.0, Direction::W),
        ];

        let first = score_hint(&matrix, &hints[0], &config).unwrap();
        let second = score_hint(&matrix, &hints[1], &config).unwrap();
        let ranking = aggregate(&matrix, &hints, &config).unwrap();

        assert_eq!(ranking.len(), 4);
        for candidate in ranking.iter() {
            let expected = first.get(&candidate.country).unwrap() + second.get(&candidate.country).unwrap();
            assert!((candidate.score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_hints_pin_the_target() {
        let matrix = cross();
        let cb = matrix.distance("C", "B").unwrap();
        let db = matrix.distance("D", "B").unwrap();
        let hints = vec![Hint::new("C", cb), Hint::with_direction("D", db, Direction::NW)];

        let ranking = aggregate(&matrix, &hints, &TriangulationConfig::default()).unwrap();
        let best = ranking.best().unwrap();
        assert_eq!(best.country, "B");
        assert!(best.score.abs() < 1e-9);
        assert!(ranking.iter().skip(1).all(|c| c.score > 1.0));
    }

    #[test]
    fn test_sorted_ascending() {
        let matrix = cross();
        let hints = vec![Hint::new("B", 300.0), Hint::with_direction("C", 900.0, Direction::N)];
        let ranking = aggregate(&matrix, &hints, &TriangulationConfig::default()).unwrap();
        let scores: Vec<f64> = ranking.iter().map(|c| c.score).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranking.best().map(|c| c.score), scores.first().copied());
    }

    #[test]
    fn test_empty_hints_give_empty_ranking() {
        let matrix = cross();
        let ranking = aggregate(&matrix, &[], &TriangulationConfig::default()).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_bad_hint_aborts_query() {
        let matrix = cross();
        let hints = vec![Hint::new("A", 100.0), Hint::new("Atlantis", 100.0)];
        let err = aggregate(&matrix, &hints, &TriangulationConfig::default()).unwrap_err();
        assert!(matches!(err, TriangulationError::UnknownCountry { .. }));
    }

    #[test]
    fn test_idempotent() {
        let matrix = cross();
        let hints = vec![Hint::with_direction("A", 800.0, Direction::NE), Hint::new("C", 2000.0)];
        let config = TriangulationConfig::default();
        let first = aggregate(&matrix, &hints, &config).unwrap();
        let second = aggregate(&matrix, &hints, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_infinite_penalty_sorts_excluded_last() {
        let matrix = cross();
        let hints = vec![Hint::with_direction("A", 1000.0, Direction::N), Hint::new("C", 2000.0)];
        let ranking = aggregate(&matrix, &hints, &TriangulationConfig::standalone()).unwrap();
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking.best().unwrap().country, "B");
        assert_eq!(ranking.plausible().count(), 1);
        assert!(ranking.iter().skip(1).all(RankedCandidate::is_excluded));
    }

    #[test]
    fn test_from_scores_drops_undefined_and_keeps_tie_order() {
        let ranking = Ranking::from_scores(vec![
            ("x", 2.0),
            ("y", f64::NAN),
            ("z", 1.0),
            ("w", 2.0),
        ]);
        let order: Vec<&str> = ranking.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(order, vec!["z", "x", "w"]);
        assert_eq!(ranking.position("w"), Some(2));
        assert_eq!(ranking.position("y"), None);
        assert_eq!(ranking.top(10).len(), 3);
    }

    #[test]
    fn test_ranking_serializes_as_list() {
        let ranking = Ranking::from_scores(vec![("B", 0.5)]);
        let json = serde_json::to_string(&ranking).unwrap();
        assert_eq!(json, r#"[{"country":"B","score":0.5}]"#);
    }
}
