use crate::models::{Match, Participant};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Placeholder for ids with no participant record
pub const UNKNOWN_NAME: &str = "???";

/// One reveal screen: a match with names resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCard {
    pub id: Uuid,
    pub p1_name: String,
    pub p2_name: String,
    pub score: u8,
    pub title: String,
}

/// Score-sorted sequence of reveal cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealDeck {
    cards: Vec<RevealCard>,
}

impl RevealDeck {
    pub fn new(matches: &[Match], participants: &[Participant]) -> Self {
        let names: HashMap<Uuid, &str> = participants.iter().map(|p| (p.id, p.name.as_str())).collect();
        let name_of = |id: &Uuid| names.get(id).copied().unwrap_or(UNKNOWN_NAME).to_string();

        let mut cards: Vec<RevealCard> = matches
            .iter()
            .map(|m| RevealCard {
                id: m.id,
                p1_name: name_of(&m.p1_id),
                p2_name: name_of(&m.p2_id),
                score: m.score,
                title: m.title.clone(),
            })
            .collect();

        // Stable, so equal scores keep store order
        cards.sort_by(|a, b| b.score.cmp(&a.score));

        Self { cards }
    }

    pub fn cards(&self) -> &[RevealCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> RevealCursor<'_> {
        RevealCursor {
            deck: self,
            position: None,
        }
    }
}

/// Operator-driven position in a deck
///
/// Starts before the first card and stops on the last one.
#[derive(Debug, Clone, Copy)]
pub struct RevealCursor<'a> {
    deck: &'a RevealDeck,
    position: Option<usize>,
}

impl<'a> RevealCursor<'a> {
    /// Move one card forward; returns false once nothing is left to reveal
    pub fn advance(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.deck.len() {
            self.position = Some(next);
            true
        } else {
            false
        }
    }

    /// Advance `steps` times from the current position
    pub fn advance_by(&mut self, steps: usize) {
        for _ in 0..steps {
            if !self.advance() {
                break;
            }
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&'a RevealCard> {
        self.position.and_then(|p| self.deck.cards.get(p))
    }

    pub fn is_finished(&self) -> bool {
        match self.position {
            Some(p) => p + 1 >= self.deck.len(),
            None => self.deck.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn participant(n: u128, name: &str) -> Participant {
        Participant {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn stored_match(n: u128, p1: u128, p2: u128, score: u8) -> Match {
        Match {
            id: Uuid::from_u128(100 + n),
            p1_id: Uuid::from_u128(p1),
            p2_id: Uuid::from_u128(p2),
            score,
            title: format!("Title {}", n),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deck_sorts_by_score_and_resolves_names() {
        let participants = vec![participant(1, "Ada"), participant(2, "Grace"), participant(3, "Linus")];
        let matches = vec![stored_match(1, 1, 2, 40), stored_match(2, 3, 9, 90)];

        let deck = RevealDeck::new(&matches, &participants);

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].score, 90);
        assert_eq!(deck.cards()[0].p1_name, "Linus");
        assert_eq!(deck.cards()[0].p2_name, UNKNOWN_NAME);
        assert_eq!(deck.cards()[1].p1_name, "Ada");
    }

    #[test]
    fn test_cursor_walks_without_looping() {
        let participants = vec![participant(1, "Ada"), participant(2, "Grace")];
        let matches = vec![stored_match(1, 1, 2, 40), stored_match(2, 1, 2, 80)];
        let deck = RevealDeck::new(&matches, &participants);
        let mut cursor = deck.cursor();

        assert_eq!(cursor.position(), None);
        assert!(cursor.current().is_none());
        assert!(!cursor.is_finished());

        assert!(cursor.advance());
        assert_eq!(cursor.current().map(|c| c.score), Some(80));
        assert!(cursor.advance());
        assert!(cursor.is_finished());
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), Some(1));
    }

    #[test]
    fn test_empty_deck_is_finished() {
        let deck = RevealDeck::default();
        let mut cursor = deck.cursor();
        assert!(cursor.is_finished());
        cursor.advance_by(3);
        assert!(cursor.current().is_none());
    }
}
