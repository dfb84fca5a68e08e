//! Utility functions for the rating engine

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round a rating to two decimal places
///
/// Post-match ratings are persisted with exactly this rounding; the
/// two-decimal policy is a behavioral contract, not a precision hint.
pub fn round_rating(rating: f64) -> f64 {
    (rating * 100.0).round() / 100.0
}

/// Check if two ratings are within the given tolerance
pub fn ratings_within_tolerance(rating1: f64, rating2: f64, tolerance: f64) -> bool {
    (rating1 - rating2).abs() <= tolerance
}
