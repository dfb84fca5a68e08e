//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine scenarios
///
/// Every variant carries the offending identifiers so callers can diagnose
/// failures precisely. Errors are always returned or propagated, never
/// logged-and-ignored inside the engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RatingError {
    #[error("At least 2 participants are required, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Duplicate participant: {participant_id}")]
    DuplicateParticipant { participant_id: String },

    #[error("Content not found: {content_id}")]
    ContentNotFound { content_id: String },

    #[error("Invalid score {score} for participant {participant_id}: scores must be non-negative")]
    InvalidScore { participant_id: String, score: f64 },

    #[error("Score not found for participant: {participant_id}")]
    ScoreNotFound { participant_id: String },

    #[error("Rating not found for participant: {participant_id}")]
    RatingNotFound { participant_id: String },

    #[error("Persistence failure: {message} (participants already updated: {updated_participants:?})")]
    Persistence {
        message: String,
        /// Participants whose ratings were written before the failure.
        /// The engine does not roll these back; the caller decides on
        /// compensating action.
        updated_participants: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RatingError {
    /// Wrap a store-layer failure that happened before any rating write
    pub fn persistence(message: impl Into<String>) -> Self {
        RatingError::Persistence {
            message: message.into(),
            updated_participants: Vec::new(),
        }
    }
}
