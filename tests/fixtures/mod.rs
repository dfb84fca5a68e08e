//! Test fixtures and mock implementations for integration testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use score_room::error::Result;
use score_room::types::{Content, MatchRecord, PlayerId, RatingEntry};
use score_room::{InMemoryRatingStore, RatingStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Standard test content: slope 32, temperature 400, default rating 1500
pub fn karuta_content() -> Content {
    Content {
        id: "karuta".to_string(),
        name: "Karuta".to_string(),
        default_rating: 1500.0,
        slope: 32.0,
        temperature: 400.0,
    }
}

pub fn scores(pairs: &[(&str, f64)]) -> HashMap<PlayerId, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Store wrapper that fails rating updates after a set number of successes
///
/// Used to exercise the partial-persistence behavior: a failure midway
/// through the per-participant update loop leaves earlier writes applied.
pub struct FailingUpdateStore {
    inner: InMemoryRatingStore,
    updates_before_failure: usize,
    updates_seen: AtomicUsize,
}

impl FailingUpdateStore {
    pub fn new(updates_before_failure: usize) -> Self {
        Self {
            inner: InMemoryRatingStore::new(),
            updates_before_failure,
            updates_seen: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &InMemoryRatingStore {
        &self.inner
    }
}

#[async_trait]
impl RatingStore for FailingUpdateStore {
    async fn get_rating(
        &self,
        player_id: &str,
        content_id: &str,
    ) -> Result<Option<RatingEntry>> {
        self.inner.get_rating(player_id, content_id).await
    }

    async fn put_rating(&self, entry: RatingEntry) -> Result<()> {
        self.inner.put_rating(entry).await
    }

    async fn update_rating(
        &self,
        player_id: &str,
        content_id: &str,
        new_rating: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let seen = self.updates_seen.fetch_add(1, Ordering::SeqCst);
        if seen >= self.updates_before_failure {
            anyhow::bail!("injected store failure on update {}", seen + 1);
        }
        self.inner
            .update_rating(player_id, content_id, new_rating, timestamp)
            .await
    }

    async fn get_content(&self, content_id: &str) -> Result<Option<Content>> {
        self.inner.get_content(content_id).await
    }

    async fn put_content(&self, content: Content) -> Result<()> {
        self.inner.put_content(content).await
    }

    async fn append_match(&self, record: MatchRecord) -> Result<()> {
        self.inner.append_match(record).await
    }

    async fn list_ratings(
        &self,
        content_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(PlayerId, f64)>> {
        self.inner.list_ratings(content_id, limit).await
    }

    async fn recent_matches(&self, limit: usize) -> Result<Vec<MatchRecord>> {
        self.inner.recent_matches(limit).await
    }
}
