use crate::models::{Match, NewMatch, Participant, Response};
use crate::services::store::{materialize, sort_matches, MatchStore, StoreError};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    participants: Vec<Participant>,
    responses: Vec<Response>,
    matches: Vec<Match>,
}

/// In-process store for development and tests
///
/// All tables live behind one lock, so every operation is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn add_participant(&self, participant: &Participant, responses: &[Response]) -> Result<(), StoreError> {
        if let Some(stray) = responses.iter().find(|r| r.participant_id != participant.id) {
            return Err(StoreError::InvalidInput(format!(
                "Response to question {} belongs to {}, not {}",
                stray.question_id, stray.participant_id, participant.id
            )));
        }

        let mut answered = HashSet::new();
        if let Some(repeat) = responses.iter().find(|r| !answered.insert(r.question_id)) {
            return Err(StoreError::InvalidInput(format!(
                "Question {} answered twice by {}",
                repeat.question_id, participant.id
            )));
        }

        let mut tables = self.tables.lock().await;
        if tables.participants.iter().any(|p| p.id == participant.id) {
            return Err(StoreError::InvalidInput(format!("Participant {} already exists", participant.id)));
        }

        tables.participants.push(participant.clone());
        tables.responses.extend_from_slice(responses);

        tracing::debug!("Stored participant {} with {} responses", participant.id, responses.len());

        Ok(())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let tables = self.tables.lock().await;
        let mut participants = tables.participants.clone();
        participants.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(participants)
    }

    async fn list_responses(&self) -> Result<Vec<Response>, StoreError> {
        Ok(self.tables.lock().await.responses.clone())
    }

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        let mut matches = self.tables.lock().await.matches.clone();
        sort_matches(&mut matches);
        Ok(matches)
    }

    async fn replace_matches(&self, matches: &[NewMatch]) -> Result<Vec<Match>, StoreError> {
        let mut stored = materialize(matches)?;

        let mut tables = self.tables.lock().await;
        let known: HashSet<Uuid> = tables.participants.iter().map(|p| p.id).collect();
        if let Some(missing) = stored
            .iter()
            .flat_map(|m| [m.p1_id, m.p2_id])
            .find(|id| !known.contains(id))
        {
            return Err(StoreError::NotFound(format!("Participant {}", missing)));
        }

        sort_matches(&mut stored);
        let removed = std::mem::replace(&mut tables.matches, stored.clone());

        tracing::debug!("Replaced {} matches with {}", removed.len(), stored.len());

        Ok(stored)
    }

    async fn clear_matches(&self) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let removed = tables.matches.len() as u64;
        tables.matches.clear();
        Ok(removed)
    }

    async fn reset(&self) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let removed = tables.participants.len() as u64;
        *tables = Tables::default();

        tracing::info!("Reset memory store ({} participants removed)", removed);

        Ok(removed)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
