//! Match processing orchestration
//!
//! This module wires validation, rating fetch/seed, delta calculation,
//! ranking, and persistence into the end-to-end pipeline that turns a set
//! of participant scores into an appended match record.

use crate::error::RatingError;
use crate::rating::calculator::RatingCalculator;
use crate::rating::ranking::assign_rankings;
use crate::rating::storage::RatingStore;
use crate::rating::validator::validate_participants;
use crate::types::{ContentId, MatchRecord, ParticipantResult, PlayerId, RatingEntry};
use crate::utils::{current_timestamp, generate_match_id, round_rating};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info};

/// Registry of per-(player, content) locks
///
/// Two concurrent matches sharing a participant would otherwise both read
/// the same pre-rating and the second write would silently drop the first
/// update. The processor serializes its fetch-compute-persist sequence per
/// key; locks are acquired in sorted key order so overlapping participant
/// sets cannot deadlock.
#[derive(Debug, Default)]
struct KeyLocks {
    locks: Mutex<HashMap<(PlayerId, ContentId), Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    fn lock_handle(&self, player_id: &str, content_id: &str) -> crate::error::Result<Arc<AsyncMutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| RatingError::Internal {
            message: "Failed to acquire key-lock registry".to_string(),
        })?;

        Ok(locks
            .entry((player_id.to_string(), content_id.to_string()))
            .or_default()
            .clone())
    }
}

/// Orchestrates match processing against a rating store
///
/// The pipeline runs Validating -> Fetching -> Computing -> Persisting, with
/// any step failure aborting the match. Validation and fetch failures leave
/// no effects (aside from lazy rating seeding, which is an independent
/// write); a persistence failure partway through the per-participant update
/// loop leaves earlier participants updated and is surfaced with their ids.
pub struct MatchProcessor {
    store: Arc<dyn RatingStore>,
    calculator: RatingCalculator,
    key_locks: KeyLocks,
}

impl MatchProcessor {
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self {
            store,
            calculator: RatingCalculator::new(),
            key_locks: KeyLocks::default(),
        }
    }

    /// Process a match and return the assembled record
    ///
    /// `scores` maps participant ids to raw scores; `reader_id` is the
    /// optional officiant, rejected if it coincides with a participant.
    /// Store failures abort immediately and are never retried here; the
    /// caller decides whether to resubmit.
    pub async fn process_match(
        &self,
        reader_id: Option<PlayerId>,
        scores: HashMap<PlayerId, f64>,
        content_id: &str,
    ) -> crate::error::Result<MatchRecord> {
        let mut participant_ids: Vec<PlayerId> = scores.keys().cloned().collect();
        participant_ids.sort();

        // Validating
        validate_participants(&participant_ids, reader_id.as_ref())?;
        for id in &participant_ids {
            let score = scores[id];
            if !score.is_finite() || score < 0.0 {
                return Err(RatingError::InvalidScore {
                    participant_id: id.clone(),
                    score,
                }
                .into());
            }
        }

        debug!(
            content_id,
            participants = participant_ids.len(),
            "Processing match"
        );

        // Serialize on the participant keys for the rest of the pipeline
        let _guards = self.lock_keys(&participant_ids, content_id).await?;

        // Fetching
        let content = self
            .store
            .get_content(content_id)
            .await
            .map_err(|e| RatingError::persistence(format!("content fetch failed: {e}")))?
            .ok_or_else(|| RatingError::ContentNotFound {
                content_id: content_id.to_string(),
            })?;
        content.validate()?;

        let mut pre_ratings = HashMap::with_capacity(participant_ids.len());
        for id in &participant_ids {
            let rating = self.fetch_or_seed_rating(id, &content.id, content.default_rating).await?;
            pre_ratings.insert(id.clone(), rating);
        }

        // Computing
        let deltas = self
            .calculator
            .compute_deltas(&participant_ids, &pre_ratings, &scores, &content)?;
        let rankings = assign_rankings(&scores);

        let mut post_ratings = HashMap::with_capacity(participant_ids.len());
        for id in &participant_ids {
            post_ratings.insert(id.clone(), round_rating(pre_ratings[id] + deltas[id]));
        }

        // Persisting: per-participant updates first, then the match record.
        // A failure mid-loop leaves earlier writes applied; the error names
        // the participants already updated so the caller can compensate.
        let played_at = current_timestamp();
        let mut updated: Vec<PlayerId> = Vec::new();
        for id in &participant_ids {
            self.store
                .update_rating(id, content_id, post_ratings[id], played_at)
                .await
                .map_err(|e| RatingError::Persistence {
                    message: format!("rating update failed for participant {id}: {e}"),
                    updated_participants: updated.clone(),
                })?;
            updated.push(id.clone());
        }

        let participants: Vec<ParticipantResult> = rankings
            .iter()
            .map(|(id, rank)| ParticipantResult {
                participant_id: id.clone(),
                score: scores[id],
                pre_rating: pre_ratings[id],
                post_rating: post_ratings[id],
                ranking: *rank,
            })
            .collect();

        let record = MatchRecord {
            id: generate_match_id(),
            content_id: content_id.to_string(),
            reader_id,
            participants,
            played_at,
        };

        self.store
            .append_match(record.clone())
            .await
            .map_err(|e| RatingError::Persistence {
                message: format!("match append failed: {e}"),
                updated_participants: updated,
            })?;

        info!(
            content_id,
            match_id = %record.id,
            participants = record.participants.len(),
            "Match processed"
        );

        Ok(record)
    }

    /// Leaderboard for a content, rating descending
    pub async fn leaderboard(
        &self,
        content_id: &str,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<(PlayerId, f64)>> {
        self.store
            .get_content(content_id)
            .await?
            .ok_or_else(|| RatingError::ContentNotFound {
                content_id: content_id.to_string(),
            })?;

        self.store.list_ratings(content_id, limit).await
    }

    /// Most recently processed matches, newest first
    pub async fn recent_matches(&self, limit: usize) -> crate::error::Result<Vec<MatchRecord>> {
        self.store.recent_matches(limit).await
    }

    /// Read a participant's rating, seeding it at the default on first reference
    ///
    /// The seed is persisted before computation proceeds, so a later fetch
    /// failure still leaves the seeded entry behind.
    async fn fetch_or_seed_rating(
        &self,
        player_id: &str,
        content_id: &str,
        default_rating: f64,
    ) -> crate::error::Result<f64> {
        let existing = self
            .store
            .get_rating(player_id, content_id)
            .await
            .map_err(|e| {
                RatingError::persistence(format!("rating fetch failed for {player_id}: {e}"))
            })?;

        if let Some(entry) = existing {
            return Ok(entry.rating);
        }

        debug!(player_id, content_id, default_rating, "Seeding new rating");
        self.store
            .put_rating(RatingEntry::new(
                player_id.to_string(),
                content_id.to_string(),
                default_rating,
            ))
            .await
            .map_err(|e| {
                RatingError::persistence(format!("rating seed failed for {player_id}: {e}"))
            })?;

        Ok(default_rating)
    }

    /// Acquire per-key locks for all participants, sorted key order
    async fn lock_keys(
        &self,
        participant_ids: &[PlayerId],
        content_id: &str,
    ) -> crate::error::Result<Vec<OwnedMutexGuard<()>>> {
        // participant_ids is already sorted, which fixes the global
        // acquisition order across concurrent matches
        let mut guards = Vec::with_capacity(participant_ids.len());
        for id in participant_ids {
            let handle = self.key_locks.lock_handle(id, content_id)?;
            guards.push(handle.lock_owned().await);
        }
        Ok(guards)
    }
}
