use crate::core::{profile::TraitProfile, similarity::trait_match};
use crate::models::ScoringWeights;

/// Compatibility score (0-100) of two trait profiles
///
/// Scoring formula:
/// score = round(100 * (
///     personality   * 0.35 +
///     love_language * 0.25 +
///     interests     * 0.20 +
///     tech_role     * 0.20
/// ))
///
/// where each term is the positional `trait_match` of the two profiles'
/// answers for that category and the weights come from `weights`.
pub fn calculate_pair_score(a: &TraitProfile, b: &TraitProfile, weights: &ScoringWeights) -> u8 {
    let weighted: f64 = weights
        .iter()
        .map(|(category, weight)| weight * trait_match(a.answers(category), b.answers(category)))
        .sum();

    (weighted * 100.0).round().clamp(0.0, 100.0) as u8
}
