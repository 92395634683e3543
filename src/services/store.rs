use crate::models::{Match, NewMatch, Participant, Response};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading or writing quiz data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Storage boundary for participants, responses and matches
///
/// Listing order is part of the contract:
/// - participants: newest first
/// - responses: insertion order
/// - matches: score descending, then `(p1_id, p2_id)` ascending
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Persist a participant together with all of its responses
    async fn add_participant(&self, participant: &Participant, responses: &[Response]) -> Result<(), StoreError>;

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    async fn list_responses(&self) -> Result<Vec<Response>, StoreError>;

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError>;

    /// Atomically swap the whole match set
    ///
    /// Either every existing match is gone and `matches` is stored, or
    /// nothing changed. Concurrent calls are serialized.
    async fn replace_matches(&self, matches: &[NewMatch]) -> Result<Vec<Match>, StoreError>;

    /// Delete every match, returning how many were removed
    async fn clear_matches(&self) -> Result<u64, StoreError>;

    /// Delete every participant along with their responses and matches
    async fn reset(&self) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Assign ids and a shared timestamp to a freshly computed match set
pub(crate) fn materialize(matches: &[NewMatch]) -> Result<Vec<Match>, StoreError> {
    let created_at = Utc::now();

    matches
        .iter()
        .map(|m| {
            if m.p1_id == m.p2_id {
                return Err(StoreError::InvalidInput(format!("Participant {} matched with itself", m.p1_id)));
            }
            if m.score > 100 {
                return Err(StoreError::InvalidInput(format!("Score {} out of range", m.score)));
            }
            Ok(Match {
                id: Uuid::new_v4(),
                p1_id: m.p1_id,
                p2_id: m.p2_id,
                score: m.score,
                title: m.title.clone(),
                created_at,
            })
        })
        .collect()
}

/// Order matches the way every store lists them
pub(crate) fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| (a.p1_id, a.p2_id).cmp(&(b.p1_id, b.p2_id)))
    });
}
