//! MatchMatrix - quiz-driven matchmaking service for Valentine's events
//!
//! Attendees submit a personality quiz, an admin runs a greedy pairwise
//! matching pass over all responses, and a reveal screen walks through the
//! resulting pairs.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{trait_match, Matcher, RevealDeck};
pub use models::{Match, NewMatch, Participant, Response, ScoringWeights, TraitCategory};
pub use services::{run_matching, MatchStore, MemoryStore, PostgresClient};
