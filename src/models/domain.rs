use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Quiz dimension an answer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Personality,
    LoveLanguage,
    Interests,
    TechRole,
    EnergyLevel,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 5] = [
        TraitCategory::Personality,
        TraitCategory::LoveLanguage,
        TraitCategory::Interests,
        TraitCategory::TechRole,
        TraitCategory::EnergyLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitCategory::Personality => "personality",
            TraitCategory::LoveLanguage => "love_language",
            TraitCategory::Interests => "interests",
            TraitCategory::TechRole => "tech_role",
            TraitCategory::EnergyLevel => "energy_level",
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trait category: {0}")]
pub struct UnknownTrait(pub String);

impl FromStr for TraitCategory {
    type Err = UnknownTrait;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownTrait(s.to_string()))
    }
}

/// Quiz attendee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A single recorded quiz answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub participant_id: Uuid,
    pub question_id: u32,
    /// Raw trait string as stored; parsed lazily so unknown traits survive a read
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub value: String,
}

impl Response {
    pub fn new(participant_id: Uuid, question_id: u32, category: TraitCategory, value: impl Into<String>) -> Self {
        Self {
            participant_id,
            question_id,
            trait_name: category.as_str().to_string(),
            value: value.into(),
        }
    }

    pub fn category(&self) -> Result<TraitCategory, UnknownTrait> {
        self.trait_name.parse()
    }
}

/// Persisted result of a matching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub p1_id: Uuid,
    pub p2_id: Uuid,
    pub score: u8,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Match computed by the matcher, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub p1_id: Uuid,
    pub p2_id: Uuid,
    pub score: u8,
    pub title: String,
}

/// Unordered participant pair with its compatibility score
///
/// The pair is normalized on construction so that `p1 < p2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairScore {
    pub p1: Uuid,
    pub p2: Uuid,
    pub score: u8,
}

impl PairScore {
    pub fn new(a: Uuid, b: Uuid, score: u8) -> Self {
        if a <= b {
            Self { p1: a, p2: b, score }
        } else {
            Self { p1: b, p2: a, score }
        }
    }
}

/// Per-category weights for the composite compatibility score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub personality: f64,
    pub love_language: f64,
    pub interests: f64,
    pub tech_role: f64,
}

impl ScoringWeights {
    /// Weighted categories in scoring order
    pub fn iter(&self) -> impl Iterator<Item = (TraitCategory, f64)> {
        [
            (TraitCategory::Personality, self.personality),
            (TraitCategory::LoveLanguage, self.love_language),
            (TraitCategory::Interests, self.interests),
            (TraitCategory::TechRole, self.tech_role),
        ]
        .into_iter()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            personality: 0.35,
            love_language: 0.25,
            interests: 0.20,
            tech_role: 0.20,
        }
    }
}
