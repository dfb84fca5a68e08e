//! Score Room - rating and ranking engine for scored multi-participant matches
//!
//! This crate converts raw per-participant scores and prior ratings into
//! mass-conserving rating deltas, derives dense competition rankings with
//! deterministic tie handling, and orchestrates the fetch-compute-persist
//! pipeline against a pluggable rating store. Each content category carries
//! its own tuning parameters (default rating, slope, temperature).

pub mod config;
pub mod error;
pub mod matches;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use matches::MatchProcessor;
pub use rating::{
    assign_rankings, validate_participants, InMemoryRatingStore, RatingCalculator, RatingStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
