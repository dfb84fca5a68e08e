//! Competition ranking derived from the score set
//!
//! Ranking is independent of the rating math: it only looks at scores.

use crate::types::PlayerId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Assign dense competition rankings from participant scores
///
/// Participants are sorted by score descending; exact ties are broken by
/// lexicographic id order so the output is reproducible for identical
/// inputs. Tied scores share a rank and the next distinct score's rank is
/// its 1-based position in the sorted sequence (1, 2, 2, 4).
pub fn assign_rankings(scores: &HashMap<PlayerId, f64>) -> Vec<(PlayerId, u32)> {
    let mut entries: Vec<(&PlayerId, f64)> = scores.iter().map(|(id, s)| (id, *s)).collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut rankings = Vec::with_capacity(entries.len());
    let mut current_rank = 1u32;
    let mut last_score: Option<f64> = None;
    for (i, (id, score)) in entries.iter().enumerate() {
        if last_score.map_or(true, |last| *score < last) {
            current_rank = i as u32 + 1;
            last_score = Some(*score);
        }
        rankings.push(((*id).clone(), current_rank));
    }

    rankings
}
