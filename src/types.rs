//! Common types used throughout the rating engine

use crate::error::RatingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players (and readers)
pub type PlayerId = String;

/// Unique identifier for rated content categories
pub type ContentId = String;

/// Unique identifier for matches
pub type MatchId = Uuid;

/// A rated content category with its tuning parameters
///
/// Parameters are immutable for the duration of a match. `slope` is the
/// K-factor scaling delta magnitude; `temperature` is the softmax divisor
/// controlling how sharply rating differences translate into expected-share
/// differences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub name: String,
    /// Seed rating for players with no rating in this content yet
    pub default_rating: f64,
    pub slope: f64,
    pub temperature: f64,
}

impl Content {
    /// Validate content tuning parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(RatingError::Configuration {
                message: format!(
                    "Temperature must be positive for content {}: {}",
                    self.id, self.temperature
                ),
            }
            .into());
        }

        if !self.slope.is_finite() {
            return Err(RatingError::Configuration {
                message: format!("Slope must be finite for content {}: {}", self.id, self.slope),
            }
            .into());
        }

        if !self.default_rating.is_finite() {
            return Err(RatingError::Configuration {
                message: format!(
                    "Default rating must be finite for content {}: {}",
                    self.id, self.default_rating
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// Persisted rating row for one (player, content) pair
///
/// Created lazily at the content's default rating on first reference,
/// mutated only by the match processor, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub player_id: PlayerId,
    pub content_id: ContentId,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry seeded at the given rating
    pub fn new(player_id: PlayerId, content_id: ContentId, rating: f64) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            content_id,
            rating,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-participant outcome of a processed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub participant_id: PlayerId,
    pub score: f64,
    pub pre_rating: f64,
    pub post_rating: f64,
    /// Dense competition rank, 1-based; ties share a rank and the next
    /// distinct score skips ahead by the tie-group size (1, 2, 2, 4)
    pub ranking: u32,
}

/// A processed match, immutable once appended to history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub content_id: ContentId,
    /// The officiant, if any; never one of the participants
    pub reader_id: Option<PlayerId>,
    /// Participant results in rank order
    pub participants: Vec<ParticipantResult>,
    pub played_at: DateTime<Utc>,
}
