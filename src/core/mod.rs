// Core algorithm exports
pub mod matcher;
pub mod profile;
pub mod quiz;
pub mod reveal;
pub mod scoring;
pub mod similarity;
pub mod titles;

pub use matcher::{select_pairs, MatchResult, Matcher, MatcherError};
pub use profile::{build_profiles, TraitProfile};
pub use quiz::{QuizError, QuizSession, QuizSubmission, QUESTIONS};
pub use reveal::{RevealCard, RevealCursor, RevealDeck};
pub use scoring::calculate_pair_score;
pub use similarity::trait_match;
pub use titles::{title_for, MATCH_TITLES};
