//! Rating store interface and in-memory implementation
//!
//! This module defines the keyed storage collaborator for per-(player,
//! content) ratings, content parameters, and match history, plus an
//! in-memory reference implementation.

use crate::error::RatingError;
use crate::types::{Content, ContentId, MatchRecord, PlayerId, RatingEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

/// Keyed storage for ratings, content parameters, and match history
///
/// The engine is storage-shape agnostic; any backend providing these
/// operations with the stated semantics can stand in. `append_match` makes
/// no idempotency guarantee: submitting the same record twice produces two
/// history entries.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Get the rating entry for a (player, content) pair, if one exists
    async fn get_rating(
        &self,
        player_id: &str,
        content_id: &str,
    ) -> crate::error::Result<Option<RatingEntry>>;

    /// Create or fully overwrite a rating entry (used for lazy seeding)
    async fn put_rating(&self, entry: RatingEntry) -> crate::error::Result<()>;

    /// Update an existing rating by key
    ///
    /// Fails with `RatingNotFound` if no entry exists for the key.
    async fn update_rating(
        &self,
        player_id: &str,
        content_id: &str,
        new_rating: f64,
        timestamp: DateTime<Utc>,
    ) -> crate::error::Result<()>;

    /// Get content tuning parameters, if the content exists
    async fn get_content(&self, content_id: &str) -> crate::error::Result<Option<Content>>;

    /// Create or replace a content definition
    async fn put_content(&self, content: Content) -> crate::error::Result<()>;

    /// Append a processed match to history
    async fn append_match(&self, record: MatchRecord) -> crate::error::Result<()>;

    /// List (player, rating) pairs for a content, rating descending
    async fn list_ratings(
        &self,
        content_id: &str,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<(PlayerId, f64)>>;

    /// Most recently appended matches, newest first
    async fn recent_matches(&self, limit: usize) -> crate::error::Result<Vec<MatchRecord>>;
}

/// In-memory rating store
///
/// Reference implementation backed by `RwLock`ed maps. Individual
/// operations are atomic; cross-operation isolation is the match
/// processor's responsibility (see the per-key serialization there).
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    ratings: RwLock<HashMap<(PlayerId, ContentId), RatingEntry>>,
    contents: RwLock<HashMap<ContentId, Content>>,
    matches: RwLock<Vec<MatchRecord>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(what: &str) -> RatingError {
        RatingError::Internal {
            message: format!("Failed to acquire {} lock", what),
        }
    }
}

#[async_trait]
impl RatingStore for InMemoryRatingStore {
    async fn get_rating(
        &self,
        player_id: &str,
        content_id: &str,
    ) -> crate::error::Result<Option<RatingEntry>> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| Self::lock_error("ratings read"))?;

        Ok(ratings
            .get(&(player_id.to_string(), content_id.to_string()))
            .cloned())
    }

    async fn put_rating(&self, entry: RatingEntry) -> crate::error::Result<()> {
        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| Self::lock_error("ratings write"))?;

        ratings.insert((entry.player_id.clone(), entry.content_id.clone()), entry);
        Ok(())
    }

    async fn update_rating(
        &self,
        player_id: &str,
        content_id: &str,
        new_rating: f64,
        timestamp: DateTime<Utc>,
    ) -> crate::error::Result<()> {
        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| Self::lock_error("ratings write"))?;

        let entry = ratings
            .get_mut(&(player_id.to_string(), content_id.to_string()))
            .ok_or_else(|| RatingError::RatingNotFound {
                participant_id: player_id.to_string(),
            })?;

        entry.rating = new_rating;
        entry.updated_at = timestamp;
        Ok(())
    }

    async fn get_content(&self, content_id: &str) -> crate::error::Result<Option<Content>> {
        let contents = self
            .contents
            .read()
            .map_err(|_| Self::lock_error("contents read"))?;

        Ok(contents.get(content_id).cloned())
    }

    async fn put_content(&self, content: Content) -> crate::error::Result<()> {
        content.validate()?;

        let mut contents = self
            .contents
            .write()
            .map_err(|_| Self::lock_error("contents write"))?;

        contents.insert(content.id.clone(), content);
        Ok(())
    }

    async fn append_match(&self, record: MatchRecord) -> crate::error::Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| Self::lock_error("matches write"))?;

        matches.push(record);
        Ok(())
    }

    async fn list_ratings(
        &self,
        content_id: &str,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<(PlayerId, f64)>> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| Self::lock_error("ratings read"))?;

        let mut listed: Vec<(PlayerId, f64)> = ratings
            .values()
            .filter(|entry| entry.content_id == content_id)
            .map(|entry| (entry.player_id.clone(), entry.rating))
            .collect();

        listed.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        if let Some(limit) = limit {
            listed.truncate(limit);
        }

        Ok(listed)
    }

    async fn recent_matches(&self, limit: usize) -> crate::error::Result<Vec<MatchRecord>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| Self::lock_error("matches read"))?;

        Ok(matches.iter().rev().take(limit).cloned().collect())
    }
}
