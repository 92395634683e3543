// Unit tests for MatchMatrix

use matchmatrix::core::{
    build_profiles, calculate_pair_score, select_pairs, title_for, trait_match, Matcher, MatcherError, MATCH_TITLES,
};
use matchmatrix::models::{Response, ScoringWeights, TraitCategory};
use std::collections::HashSet;
use uuid::Uuid;

const CATEGORIES: [TraitCategory; 5] = TraitCategory::ALL;
const VALUES: [&str; 4] = ["a", "b", "c", "d"];

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Deterministic pseudo-random answers so the property checks are reproducible
fn generated_responses(participants: &[Uuid], seed: u64) -> Vec<Response> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut responses = Vec::new();
    for participant in participants {
        for question in 0..13u32 {
            let category = CATEGORIES[question as usize % CATEGORIES.len()];
            let value = VALUES[next() % VALUES.len()];
            responses.push(Response::new(*participant, question + 1, category, value));
        }
    }
    responses
}

#[test]
fn test_trait_match_examples() {
    let empty: [&str; 0] = [];
    assert_eq!(trait_match(&empty, &["x", "y"]), 0.0);
    assert_eq!(trait_match(&["x", "y"], &empty), 0.0);
    assert_eq!(trait_match(&["a", "b"], &["a", "c"]), 0.5);
    assert!((trait_match(&["a"], &["a", "b", "c"]) - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_matcher_refuses_small_runs() {
    let matcher = Matcher::with_default_weights();
    let responses = generated_responses(&[id(1)], 7);

    assert_eq!(
        matcher.run(&[id(1)], &responses).unwrap_err(),
        MatcherError::InsufficientParticipants { found: 1 }
    );
    assert_eq!(
        matcher.run(&[], &[]).unwrap_err(),
        MatcherError::InsufficientParticipants { found: 0 }
    );
}

#[test]
fn test_scores_are_within_range() {
    let ids: Vec<Uuid> = (1..=12).map(id).collect();
    let responses = generated_responses(&ids, 42);
    let profiles = build_profiles(&responses);
    let matcher = Matcher::with_default_weights();

    let pairs = matcher.score_pairs(&ids, &profiles);

    assert_eq!(pairs.len(), 12 * 11 / 2);
    for pair in &pairs {
        assert!(pair.score <= 100, "Score {} is out of range [0, 100]", pair.score);
        assert!(pair.p1 < pair.p2);
    }
}

#[test]
fn test_selection_is_disjoint_maximal_and_locally_optimal() {
    for seed in [1u64, 2, 3, 99, 12345] {
        let ids: Vec<Uuid> = (1..=9).map(id).collect();
        let responses = generated_responses(&ids, seed);
        let profiles = build_profiles(&responses);
        let matcher = Matcher::with_default_weights();
        let pairs = matcher.score_pairs(&ids, &profiles);

        let accepted = select_pairs(pairs.clone());

        // Disjoint
        let mut used = HashSet::new();
        for pair in &accepted {
            assert!(used.insert(pair.p1), "{} matched twice", pair.p1);
            assert!(used.insert(pair.p2), "{} matched twice", pair.p2);
        }

        // Maximal: at most one participant left over and no free pair remains
        assert_eq!(accepted.len(), 4);
        assert!(!pairs.iter().any(|p| !used.contains(&p.p1) && !used.contains(&p.p2)));

        // Each step took the best pair whose endpoints were still free
        let mut taken = HashSet::new();
        for pair in &accepted {
            let better_free = pairs.iter().any(|other| {
                other.score > pair.score && !taken.contains(&other.p1) && !taken.contains(&other.p2)
            });
            assert!(!better_free, "seed {}: skipped a better free pair than {:?}", seed, pair);
            taken.insert(pair.p1);
            taken.insert(pair.p2);
        }

        // Non-increasing scores in acceptance order
        assert!(accepted.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_identical_profiles_pair_up_first() {
    let ids = [id(1), id(2), id(3), id(4)];
    let mut responses = Vec::new();
    for (participant, style) in [(id(1), 0usize), (id(3), 1), (id(2), 0), (id(4), 1)] {
        for (question, category) in CATEGORIES.iter().enumerate() {
            let value = VALUES[(style * 2 + question) % VALUES.len()];
            responses.push(Response::new(participant, question as u32 + 1, *category, value));
        }
    }
    let matcher = Matcher::with_default_weights();
    let profiles = build_profiles(&responses);

    assert_eq!(calculate_pair_score(&profiles[&id(1)], &profiles[&id(2)], matcher.weights()), 100);
    assert_eq!(calculate_pair_score(&profiles[&id(3)], &profiles[&id(4)], matcher.weights()), 100);

    let result = matcher.run(&ids, &responses).unwrap();

    assert_eq!(result.matches.len(), 2);
    let pairs: Vec<(Uuid, Uuid)> = result.matches.iter().map(|m| (m.p1_id, m.p2_id)).collect();
    assert_eq!(pairs, vec![(id(1), id(2)), (id(3), id(4))]);
    assert!(result.matches.iter().all(|m| m.score == 100));
}

#[test]
fn test_custom_weights_change_ranking() {
    let ids = [id(1), id(2), id(3)];
    let responses = vec![
        Response::new(id(1), 1, TraitCategory::Personality, "chill"),
        Response::new(id(1), 2, TraitCategory::TechRole, "backend"),
        Response::new(id(2), 1, TraitCategory::Personality, "chill"),
        Response::new(id(2), 2, TraitCategory::TechRole, "pm"),
        Response::new(id(3), 1, TraitCategory::Personality, "social"),
        Response::new(id(3), 2, TraitCategory::TechRole, "backend"),
    ];

    let default_run = Matcher::with_default_weights().run(&ids, &responses).unwrap();
    assert_eq!((default_run.matches[0].p1_id, default_run.matches[0].p2_id), (id(1), id(2)));
    assert_eq!(default_run.matches[0].score, 35);

    let tech_heavy = Matcher::new(ScoringWeights {
        personality: 0.1,
        love_language: 0.0,
        interests: 0.0,
        tech_role: 0.9,
    });
    let run = tech_heavy.run(&ids, &responses).unwrap();
    assert_eq!((run.matches[0].p1_id, run.matches[0].p2_id), (id(1), id(3)));
    assert_eq!(run.matches[0].score, 90);
}

#[test]
fn test_titles_follow_acceptance_order() {
    let ids: Vec<Uuid> = (1..=24).map(id).collect();
    let responses = generated_responses(&ids, 5);

    let result = Matcher::with_default_weights().run(&ids, &responses).unwrap();

    assert_eq!(result.matches.len(), 12);
    for (index, m) in result.matches.iter().enumerate() {
        assert_eq!(m.title, title_for(index));
    }
    assert_eq!(result.matches[10].title, MATCH_TITLES[0]);
}
