use crate::core::{
    profile::{build_profiles, TraitProfile},
    scoring::calculate_pair_score,
    titles::title_for,
};
use crate::models::{NewMatch, PairScore, Response, ScoringWeights};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised before any pair is scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    #[error("Need at least 2 participants, found {found}")]
    InsufficientParticipants { found: usize },
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<NewMatch>,
    pub participants: usize,
    pub pairs_scored: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Trait profile construction
/// 2. All-pairs scoring
/// 3. Greedy disjoint selection
/// 4. Title assignment
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Pair up participants by quiz compatibility
    ///
    /// # Arguments
    /// * `participant_ids` - Every participant taking part in the run
    /// * `responses` - Every recorded answer; answers of unlisted participants are ignored
    ///
    /// # Returns
    /// MatchResult with disjoint, titled matches in acceptance order
    pub fn run(&self, participant_ids: &[Uuid], responses: &[Response]) -> Result<MatchResult, MatcherError> {
        let ids = dedup_preserving_order(participant_ids);
        if ids.len() < 2 {
            return Err(MatcherError::InsufficientParticipants { found: ids.len() });
        }

        let profiles = build_profiles(responses);
        let pairs = self.score_pairs(&ids, &profiles);
        let pairs_scored = pairs.len();

        let matches = select_pairs(pairs)
            .into_iter()
            .enumerate()
            .map(|(index, pair)| NewMatch {
                p1_id: pair.p1,
                p2_id: pair.p2,
                score: pair.score,
                title: title_for(index).to_string(),
            })
            .collect();

        Ok(MatchResult {
            matches,
            participants: ids.len(),
            pairs_scored,
        })
    }

    /// Score every unordered pair of distinct participants
    ///
    /// Participants without a profile score as empty profiles.
    pub fn score_pairs(&self, ids: &[Uuid], profiles: &HashMap<Uuid, TraitProfile>) -> Vec<PairScore> {
        let empty = TraitProfile::new();
        let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);

        for (i, a) in ids.iter().enumerate() {
            let profile_a = profiles.get(a).unwrap_or(&empty);
            for b in &ids[i + 1..] {
                let profile_b = profiles.get(b).unwrap_or(&empty);
                let score = calculate_pair_score(profile_a, profile_b, &self.weights);
                pairs.push(PairScore::new(*a, *b, score));
            }
        }

        pairs
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Greedy maximal matching over scored pairs
///
/// Pairs are visited by score descending, ties by `(p1, p2)` ascending. A
/// pair is accepted only when neither participant is already taken.
pub fn select_pairs(mut pairs: Vec<PairScore>) -> Vec<PairScore> {
    pairs.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| (a.p1, a.p2).cmp(&(b.p1, b.p2)))
    });

    let mut used: HashSet<Uuid> = HashSet::new();
    let mut accepted = Vec::new();

    for pair in pairs {
        if used.contains(&pair.p1) || used.contains(&pair.p2) {
            continue;
        }
        used.insert(pair.p1);
        used.insert(pair.p2);
        accepted.push(pair);
    }

    accepted
}

fn dedup_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
