use crate::core::{Matcher, MatcherError};
use crate::models::Match;
use crate::services::store::{MatchStore, StoreError};
use thiserror::Error;

/// Errors of a matching run
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("{0}")]
    Insufficient(#[from] MatcherError),

    #[error("Failed to fetch quiz data: {0}")]
    Fetch(#[source] StoreError),

    #[error("Failed to store matches: {0}")]
    Replace(#[source] StoreError),
}

/// Report of a completed matching run
#[derive(Debug, Clone)]
pub struct MatchRun {
    pub participants: usize,
    pub pairs_scored: usize,
    pub matches: Vec<Match>,
}

/// Fetch every participant and response, pair them up and replace the stored matches
///
/// Nothing is written unless both fetches succeed and at least two
/// participants exist.
pub async fn run_matching(store: &dyn MatchStore, matcher: &Matcher) -> Result<MatchRun, MatchingError> {
    let participants = store.list_participants().await.map_err(MatchingError::Fetch)?;
    let responses = store.list_responses().await.map_err(MatchingError::Fetch)?;

    let ids: Vec<_> = participants.iter().map(|p| p.id).collect();

    let result = matcher.run(&ids, &responses)?;

    tracing::debug!(
        "Scored {} pairs for {} participants, accepted {}",
        result.pairs_scored,
        result.participants,
        result.matches.len()
    );

    let matches = store
        .replace_matches(&result.matches)
        .await
        .map_err(MatchingError::Replace)?;

    tracing::info!(
        "Matching run created {} matches from {} participants",
        matches.len(),
        result.participants
    );

    Ok(MatchRun {
        participants: result.participants,
        pairs_scored: result.pairs_scored,
        matches,
    })
}
