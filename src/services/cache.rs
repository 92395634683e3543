use crate::core::RevealDeck;
use crate::services::store::{MatchStore, StoreError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DECK_KEY: &str = "reveal_deck";

/// In-process cache of the rendered reveal deck
///
/// Any write to the match set must call `invalidate`. A deck built from
/// reads that straddle an invalidation is served once but never cached.
#[derive(Clone)]
pub struct RevealCache {
    decks: moka::future::Cache<&'static str, Arc<RevealDeck>>,
    generation: Arc<AtomicU64>,
}

impl RevealCache {
    pub fn new(ttl_secs: u64) -> Self {
        let decks = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            decks,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cached deck, or a freshly built one from the store
    pub async fn deck(&self, store: &dyn MatchStore) -> Result<Arc<RevealDeck>, StoreError> {
        if let Some(deck) = self.decks.get(DECK_KEY).await {
            tracing::trace!("Reveal deck cache hit");
            return Ok(deck);
        }

        let generation = self.generation.load(Ordering::Acquire);

        let matches = store.list_matches().await?;
        let participants = store.list_participants().await?;
        let deck = Arc::new(RevealDeck::new(&matches, &participants));

        if self.generation.load(Ordering::Acquire) == generation {
            self.decks.insert(DECK_KEY, deck.clone()).await;
            // An invalidation racing the insert above may have missed it
            if self.generation.load(Ordering::Acquire) != generation {
                self.decks.invalidate(DECK_KEY).await;
            }
            tracing::debug!("Built reveal deck with {} cards", deck.len());
        } else {
            tracing::debug!("Match set changed while building the reveal deck, not caching it");
        }

        Ok(deck)
    }

    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.decks.invalidate(DECK_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, NewMatch, Participant, Response};
    use crate::services::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;
    use uuid::Uuid;

    /// Memory store whose first `list_matches` parks until released
    #[derive(Default)]
    struct GatedStore {
        inner: MemoryStore,
        armed: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl MatchStore for GatedStore {
        async fn add_participant(&self, participant: &Participant, responses: &[Response]) -> Result<(), StoreError> {
            self.inner.add_participant(participant, responses).await
        }

        async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
            self.inner.list_participants().await
        }

        async fn list_responses(&self) -> Result<Vec<Response>, StoreError> {
            self.inner.list_responses().await
        }

        async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
            let matches = self.inner.list_matches().await;
            if self.armed.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            matches
        }

        async fn replace_matches(&self, matches: &[NewMatch]) -> Result<Vec<Match>, StoreError> {
            self.inner.replace_matches(matches).await
        }

        async fn clear_matches(&self) -> Result<u64, StoreError> {
            self.inner.clear_matches().await
        }

        async fn reset(&self) -> Result<u64, StoreError> {
            self.inner.reset().await
        }

        async fn health_check(&self) -> Result<bool, StoreError> {
            self.inner.health_check().await
        }
    }

    fn pairing() -> NewMatch {
        NewMatch {
            p1_id: Uuid::from_u128(1),
            p2_id: Uuid::from_u128(2),
            score: 64,
            title: "Deploy Together Forever 🌐".to_string(),
        }
    }

    #[tokio::test]
    async fn test_deck_is_cached_until_invalidated() {
        let store = MemoryStore::new();
        let cache = RevealCache::new(60);
        for n in 1..=2 {
            let p = Participant { id: Uuid::from_u128(n), name: format!("Guest {}", n), created_at: Utc::now() };
            store.add_participant(&p, &[]).await.unwrap();
        }

        assert!(cache.deck(&store).await.unwrap().is_empty());

        store.replace_matches(&[pairing()]).await.unwrap();
        assert!(cache.deck(&store).await.unwrap().is_empty());

        cache.invalidate().await;
        let deck = cache.deck(&store).await.unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.cards()[0].p1_name, "Guest 1");
    }

    #[tokio::test]
    async fn test_deck_built_across_invalidation_is_not_cached() {
        let store = Arc::new(GatedStore::default());
        let cache = RevealCache::new(60);
        for n in 1..=2 {
            let p = Participant { id: Uuid::from_u128(n), name: format!("Guest {}", n), created_at: Utc::now() };
            store.add_participant(&p, &[]).await.unwrap();
        }
        store.armed.store(true, Ordering::SeqCst);

        let reader = {
            let store = store.clone();
            let cache = cache.clone();
            tokio::spawn(async move { cache.deck(store.as_ref()).await.map(|deck| deck.len()) })
        };

        store.entered.notified().await;
        store.replace_matches(&[pairing()]).await.unwrap();
        cache.invalidate().await;
        store.release.notify_one();

        assert_eq!(reader.await.unwrap().unwrap(), 0);

        let deck = cache.deck(store.as_ref()).await.unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.cards()[0].p2_name, "Guest 2");
    }
}
