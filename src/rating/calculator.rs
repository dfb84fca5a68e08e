//! Rating delta calculation
//!
//! This module implements the core rating update: raw per-participant scores
//! and prior ratings are converted into rating deltas that conserve total
//! rating mass. Actual performance shares come from normalized clamped
//! scores; expected shares come from a softmax over temperature-scaled
//! ratings. The delta for each participant is the gap between the two
//! shares, scaled by the content's slope (K-factor).

use crate::error::RatingError;
use crate::types::{Content, PlayerId};
use std::collections::HashMap;

/// Lower bound applied to every raw score before normalization
///
/// Prevents a zero total when every score is zero and avoids a
/// zero-probability collapse for a single zero scorer. The literal value is
/// a behavioral contract.
pub const SCORE_EPSILON: f64 = 1e-6;

/// Stateless calculator mapping scores and ratings to rating deltas
///
/// No I/O and no internal state; safe to share freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingCalculator;

impl RatingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute rating deltas for all participants
    ///
    /// Both the actual-score shares and the expected shares are probability
    /// distributions summing to 1, scaled by the same slope, so the deltas
    /// sum to zero up to floating-point tolerance.
    ///
    /// Missing score or rating entries are a caller contract violation and
    /// fail with `ScoreNotFound` / `RatingNotFound`.
    pub fn compute_deltas(
        &self,
        participant_ids: &[PlayerId],
        ratings: &HashMap<PlayerId, f64>,
        scores: &HashMap<PlayerId, f64>,
        content: &Content,
    ) -> crate::error::Result<HashMap<PlayerId, f64>> {
        if participant_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Actual side: clamp(score, epsilon) normalized over the match
        let mut clamped_scores = HashMap::with_capacity(participant_ids.len());
        let mut sum_clamped = 0.0;
        for id in participant_ids {
            let score = scores.get(id).ok_or_else(|| RatingError::ScoreNotFound {
                participant_id: id.clone(),
            })?;
            let clamped = score.max(SCORE_EPSILON);
            clamped_scores.insert(id.clone(), clamped);
            sum_clamped += clamped;
        }

        // Expected side: softmax over rating / temperature, with the max
        // scaled rating subtracted before exponentiating so large ratings
        // cannot overflow (the shift cancels out of the softmax)
        let mut scaled_ratings = Vec::with_capacity(participant_ids.len());
        for id in participant_ids {
            let rating = ratings.get(id).ok_or_else(|| RatingError::RatingNotFound {
                participant_id: id.clone(),
            })?;
            scaled_ratings.push(rating / content.temperature);
        }
        let max_scaled = scaled_ratings
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let mut exps = HashMap::with_capacity(participant_ids.len());
        let mut sum_exps = 0.0;
        for (id, scaled) in participant_ids.iter().zip(&scaled_ratings) {
            let e = (scaled - max_scaled).exp();
            exps.insert(id.clone(), e);
            sum_exps += e;
        }

        let mut deltas = HashMap::with_capacity(participant_ids.len());
        for id in participant_ids {
            let actual = clamped_scores[id] / sum_clamped;
            let expected = exps[id] / sum_exps;
            deltas.insert(id.clone(), content.slope * (actual - expected));
        }

        Ok(deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_content() -> Content {
        Content {
            id: "karuta".to_string(),
            name: "Karuta".to_string(),
            default_rating: 1500.0,
            slope: 32.0,
            temperature: 400.0,
        }
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn map(pairs: &[(&str, f64)]) -> HashMap<PlayerId, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_participants() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(&[], &HashMap::new(), &HashMap::new(), &test_content())
            .unwrap();
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_worked_scenario() {
        // slope=32, temperature=400, P1 (1500, score 100) vs P2 (1450, score 80)
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["p1", "p2"]),
                &map(&[("p1", 1500.0), ("p2", 1450.0)]),
                &map(&[("p1", 100.0), ("p2", 80.0)]),
                &test_content(),
            )
            .unwrap();

        assert!((deltas["p1"] - 0.78).abs() < 0.01, "p1 delta {}", deltas["p1"]);
        assert!((deltas["p2"] + 0.78).abs() < 0.01, "p2 delta {}", deltas["p2"]);
    }

    #[test]
    fn test_conservation() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["a", "b", "c", "d"]),
                &map(&[("a", 1700.0), ("b", 1500.0), ("c", 1400.0), ("d", 1450.0)]),
                &map(&[("a", 50.0), ("b", 90.0), ("c", 10.0), ("d", 0.0)]),
                &test_content(),
            )
            .unwrap();

        let total: f64 = deltas.values().sum();
        assert!(total.abs() < 1e-9, "deltas sum to {}", total);
    }

    #[test]
    fn test_symmetry_under_equal_inputs() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["a", "b", "c"]),
                &map(&[("a", 1500.0), ("b", 1500.0), ("c", 1500.0)]),
                &map(&[("a", 40.0), ("b", 40.0), ("c", 40.0)]),
                &test_content(),
            )
            .unwrap();

        for delta in deltas.values() {
            assert!(delta.abs() < 1e-9);
        }
    }

    #[test]
    fn test_monotonicity_with_equal_ratings() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["high", "low"]),
                &map(&[("high", 1500.0), ("low", 1500.0)]),
                &map(&[("high", 100.0), ("low", 50.0)]),
                &test_content(),
            )
            .unwrap();

        assert!(deltas["high"] > 0.0);
        assert!(deltas["low"] < 0.0);
    }

    #[test]
    fn test_zero_score_epsilon_clamp() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["zero", "scorer"]),
                &map(&[("zero", 1500.0), ("scorer", 1500.0)]),
                &map(&[("zero", 0.0), ("scorer", 100.0)]),
                &test_content(),
            )
            .unwrap();

        assert!(deltas["zero"].is_finite());
        assert!(deltas["scorer"].is_finite());

        // The zero scorer's actual share is the literal epsilon, not zero
        let expected_actual = SCORE_EPSILON / (100.0 + SCORE_EPSILON);
        let expected_delta = 32.0 * (expected_actual - 0.5);
        assert!((deltas["zero"] - expected_delta).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_scores() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["a", "b"]),
                &map(&[("a", 1500.0), ("b", 1500.0)]),
                &map(&[("a", 0.0), ("b", 0.0)]),
                &test_content(),
            )
            .unwrap();

        // Equal clamped shares against equal expected shares
        assert!(deltas["a"].abs() < 1e-9);
        assert!(deltas["b"].abs() < 1e-9);
    }

    #[test]
    fn test_numerical_stability_with_large_rating_gap() {
        let calculator = RatingCalculator::new();
        let deltas = calculator
            .compute_deltas(
                &ids(&["strong", "weak"]),
                &map(&[("strong", 2200.0), ("weak", 1200.0)]),
                &map(&[("strong", 60.0), ("weak", 40.0)]),
                &test_content(),
            )
            .unwrap();

        assert!(deltas["strong"].is_finite());
        assert!(deltas["weak"].is_finite());
        // Strong player scored below the expectation the 1000-point gap implies
        assert!(deltas["strong"] < 0.0);
        assert!(deltas["weak"] > 0.0);
    }

    #[test]
    fn test_missing_score_fails() {
        let calculator = RatingCalculator::new();
        let result = calculator.compute_deltas(
            &ids(&["a", "b"]),
            &map(&[("a", 1500.0), ("b", 1500.0)]),
            &map(&[("a", 10.0)]),
            &test_content(),
        );

        let err = result.unwrap_err();
        match err.downcast_ref::<RatingError>() {
            Some(RatingError::ScoreNotFound { participant_id }) => {
                assert_eq!(participant_id, "b");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_rating_fails() {
        let calculator = RatingCalculator::new();
        let result = calculator.compute_deltas(
            &ids(&["a", "b"]),
            &map(&[("a", 1500.0)]),
            &map(&[("a", 10.0), ("b", 20.0)]),
            &test_content(),
        );

        let err = result.unwrap_err();
        match err.downcast_ref::<RatingError>() {
            Some(RatingError::RatingNotFound { participant_id }) => {
                assert_eq!(participant_id, "b");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
