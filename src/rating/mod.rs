//! Rating engine: delta calculation, ranking, validation, and storage
//!
//! The calculator, ranking, and validator pieces are pure and synchronous;
//! storage is the external collaborator they are wired to by the match
//! processor.

pub mod calculator;
pub mod ranking;
pub mod storage;
pub mod validator;

// Re-export commonly used types
pub use calculator::{RatingCalculator, SCORE_EPSILON};
pub use ranking::assign_rankings;
pub use storage::{InMemoryRatingStore, RatingStore};
pub use validator::validate_participants;
