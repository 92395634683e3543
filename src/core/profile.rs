use crate::models::{Response, TraitCategory};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Ordered answers of one participant, grouped by trait category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitProfile {
    answers: BTreeMap<TraitCategory, Vec<String>>,
}

impl TraitProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: TraitCategory, value: impl Into<String>) {
        self.answers.entry(category).or_default().push(value.into());
    }

    /// Answers for a category in submission order; empty when the category is missing
    pub fn answers(&self, category: TraitCategory) -> &[String] {
        self.answers.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Group responses by participant, then by trait category
///
/// Order within a category follows the order of `responses`. Responses with
/// an unrecognised trait are skipped.
pub fn build_profiles(responses: &[Response]) -> HashMap<Uuid, TraitProfile> {
    let mut profiles: HashMap<Uuid, TraitProfile> = HashMap::new();

    for response in responses {
        let category = match response.category() {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!(
                    "Ignoring response to question {} from {}: {}",
                    response.question_id,
                    response.participant_id,
                    e
                );
                continue;
            }
        };

        profiles
            .entry(response.participant_id)
            .or_default()
            .push(category, response.value.clone());
    }

    profiles
}
