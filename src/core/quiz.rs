use crate::models::{Response, TraitCategory};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(u32),

    #[error("Invalid option {value:?} for question {question_id}")]
    InvalidOption { question_id: u32, value: String },

    #[error("Please enter your name / nickname")]
    BlankName,

    #[error("Please answer all questions ({answered} of {total} answered)")]
    Incomplete { answered: usize, total: usize },

    #[error("Quiz already submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    #[serde(rename = "trait")]
    pub category: TraitCategory,
    pub options: [QuizOption; 4],
}

impl Question {
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

const fn opt(label: &'static str, value: &'static str) -> QuizOption {
    QuizOption { label, value }
}

/// The quiz, in presentation order
pub static QUESTIONS: [Question; 13] = [
    Question {
        id: 1,
        text: "How do you debug a tricky bug at 2 AM?",
        category: TraitCategory::Personality,
        options: [
            opt("Methodical console.log everywhere", "analytical"),
            opt("Rubber duck it with a friend", "social"),
            opt("Stack Overflow deep dive", "resourceful"),
            opt("Rage quit, sleep, fix it in 5 min tomorrow", "chill"),
        ],
    },
    Question {
        id: 2,
        text: "Your ideal weekend looks like…",
        category: TraitCategory::Personality,
        options: [
            opt("Hackathon with snacks", "analytical"),
            opt("Board games & binge-watching", "social"),
            opt("Solo hike or reading", "chill"),
            opt("Exploring a new café or city", "resourceful"),
        ],
    },
    Question {
        id: 3,
        text: "Pick your love language:",
        category: TraitCategory::LoveLanguage,
        options: [
            opt("Words of affirmation (send memes & compliments)", "words"),
            opt("Quality time (let's co-work silently)", "time"),
            opt("Acts of service (I'll fix your code)", "service"),
            opt("Gifts (surprise boba delivery)", "gifts"),
        ],
    },
    Question {
        id: 4,
        text: "How do you show someone you care?",
        category: TraitCategory::LoveLanguage,
        options: [
            opt("Write them a heartfelt message", "words"),
            opt("Plan a whole day together", "time"),
            opt("Help them with their project", "service"),
            opt("Get them something thoughtful", "gifts"),
        ],
    },
    Question {
        id: 5,
        text: "It's 11 PM. You're most likely…",
        category: TraitCategory::EnergyLevel,
        options: [
            opt("Deep in a coding sprint", "night_owl"),
            opt("Already asleep since 10", "early_bird"),
            opt("Watching YouTube rabbit holes", "night_owl"),
            opt("Journaling or winding down", "balanced"),
        ],
    },
    Question {
        id: 6,
        text: "Your energy at a party:",
        category: TraitCategory::EnergyLevel,
        options: [
            opt("I AM the party 🎉", "extrovert"),
            opt("Vibing with 2-3 close friends", "balanced"),
            opt("Found the dog, petting it in the corner", "introvert"),
            opt("Left early to recharge", "introvert"),
        ],
    },
    Question {
        id: 7,
        text: "Pick your ideal date:",
        category: TraitCategory::Interests,
        options: [
            opt("Netflix & code review", "tech"),
            opt("Stargazing on a rooftop", "romantic"),
            opt("Competitive gaming session", "gaming"),
            opt("Cooking together from a recipe", "creative"),
        ],
    },
    Question {
        id: 8,
        text: "What's your go-to content?",
        category: TraitCategory::Interests,
        options: [
            opt("Tech podcasts / dev blogs", "tech"),
            opt("Anime / K-dramas", "creative"),
            opt("Memes & Reels", "gaming"),
            opt("Books & poetry", "romantic"),
        ],
    },
    Question {
        id: 9,
        text: "In a group project, you're the one who…",
        category: TraitCategory::TechRole,
        options: [
            opt("Designs the entire system architecture", "backend"),
            opt("Makes the UI pixel-perfect", "frontend"),
            opt("Writes the README and presents", "pm"),
            opt("Does everything the night before", "fullstack"),
        ],
    },
    Question {
        id: 10,
        text: "Pick a superpower:",
        category: TraitCategory::TechRole,
        options: [
            opt("Read anyone's mind (like reading docs)", "backend"),
            opt("Make anything beautiful instantly", "frontend"),
            opt("Freeze time (more deadlines!)", "fullstack"),
            opt("Teleport (skip commutes)", "pm"),
        ],
    },
    Question {
        id: 11,
        text: "Your Valentine's Day ideal:",
        category: TraitCategory::Personality,
        options: [
            opt("Candlelit dinner & roses", "social"),
            opt("Anti-Valentine party with friends", "resourceful"),
            opt("Cozy movie marathon for two", "chill"),
            opt("Surprise adventure date", "analytical"),
        ],
    },
    Question {
        id: 12,
        text: "Pick a coding emoji that represents you:",
        category: TraitCategory::TechRole,
        options: [
            opt("🧠 Brain (logic master)", "backend"),
            opt("🎨 Palette (design guru)", "frontend"),
            opt("🔥 Fire (ship fast)", "fullstack"),
            opt("📋 Clipboard (organized PM)", "pm"),
        ],
    },
    Question {
        id: 13,
        text: "How do you handle conflict?",
        category: TraitCategory::LoveLanguage,
        options: [
            opt("Talk it out openly", "words"),
            opt("Give space, then reconnect", "time"),
            opt("Do something nice to make up", "service"),
            opt("Write a long apology text", "gifts"),
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Submitted,
}

/// Outcome of recording an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor is on the question at this index
    Next(usize),
    /// Last question answered; waiting for an explicit submit
    AwaitSubmit,
}

/// Validated quiz submission, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub name: String,
    /// (question, value) in question order
    pub answers: Vec<(&'static Question, String)>,
}

impl QuizSubmission {
    pub fn responses(&self, participant_id: Uuid) -> Vec<Response> {
        self.answers
            .iter()
            .map(|(question, value)| Response::new(participant_id, question.id, question.category, value.clone()))
            .collect()
    }
}

/// Linear walk over the question list
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [Question],
    current: usize,
    answers: BTreeMap<u32, String>,
    phase: QuizPhase,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_questions(&QUESTIONS)
    }

    pub fn with_questions(questions: &'static [Question]) -> Self {
        Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            phase: QuizPhase::Answering,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        self.questions.get(self.current)
    }

    /// Answered fraction, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.answers.len() as f64 / self.questions.len() as f64
    }

    /// Record an answer
    ///
    /// Answering the current question moves the cursor to the next one.
    /// Answering any other question records it and leaves the cursor alone.
    pub fn answer(&mut self, question_id: u32, value: &str) -> Result<Advance, QuizError> {
        if self.phase == QuizPhase::Submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let (index, question) = self
            .questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.id == question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;

        if !question.accepts(value) {
            return Err(QuizError::InvalidOption {
                question_id,
                value: value.to_string(),
            });
        }

        self.answers.insert(question_id, value.to_string());

        if index + 1 == self.questions.len() {
            return Ok(Advance::AwaitSubmit);
        }
        if index == self.current {
            self.current += 1;
        }
        Ok(Advance::Next(self.current))
    }

    pub fn submit(&mut self, name: &str) -> Result<QuizSubmission, QuizError> {
        if self.phase == QuizPhase::Submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::BlankName);
        }

        if self.answers.len() < self.questions.len() {
            return Err(QuizError::Incomplete {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }

        let questions = self.questions;
        let answers = questions
            .iter()
            .filter_map(|q| self.answers.get(&q.id).map(|value| (q, value.clone())))
            .collect();

        self.phase = QuizPhase::Submitted;

        Ok(QuizSubmission {
            name: name.to_string(),
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(session: &mut QuizSession) {
        for question in QUESTIONS.iter() {
            session.answer(question.id, question.options[0].value).unwrap();
        }
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<u32> = QUESTIONS.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_auto_advance_stops_at_last_question() {
        let mut session = QuizSession::new();

        assert_eq!(session.answer(1, "analytical"), Ok(Advance::Next(1)));
        assert_eq!(session.current_question().map(|q| q.id), Some(2));

        for question in &QUESTIONS[1..QUESTIONS.len() - 1] {
            session.answer(question.id, question.options[1].value).unwrap();
        }
        assert_eq!(session.answer(13, "gifts"), Ok(Advance::AwaitSubmit));
        assert_eq!(session.current_question().map(|q| q.id), Some(13));
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_answering_out_of_order_keeps_cursor() {
        let mut session = QuizSession::new();

        assert_eq!(session.answer(13, "words"), Ok(Advance::AwaitSubmit));
        assert_eq!(session.answer(5, "balanced"), Ok(Advance::Next(0)));
        assert_eq!(session.current_question().map(|q| q.id), Some(1));

        assert_eq!(session.answer(1, "social"), Ok(Advance::Next(1)));
        assert_eq!(session.current_question().map(|q| q.id), Some(2));
    }

    #[test]
    fn test_rejects_unknown_question_and_option() {
        let mut session = QuizSession::new();
        assert_eq!(session.answer(42, "x"), Err(QuizError::UnknownQuestion(42)));
        assert!(matches!(
            session.answer(1, "words"),
            Err(QuizError::InvalidOption { question_id: 1, .. })
        ));
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_submit_requires_name_and_all_answers() {
        let mut session = QuizSession::new();
        session.answer(1, "chill").unwrap();

        assert_eq!(session.submit("Ada"), Err(QuizError::Incomplete { answered: 1, total: 13 }));

        answer_all(&mut session);
        assert_eq!(session.submit("   "), Err(QuizError::BlankName));

        let submission = session.submit("  Ada ").unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.answers.len(), 13);
        assert_eq!(session.phase(), QuizPhase::Submitted);
        assert_eq!(session.submit("Ada"), Err(QuizError::AlreadySubmitted));
    }

    #[test]
    fn test_submission_responses_follow_question_order() {
        let mut session = QuizSession::new();
        for question in QUESTIONS.iter().rev() {
            session.answer(question.id, question.options[2].value).unwrap();
        }
        let submission = session.submit("Grace").unwrap();
        let participant = Uuid::from_u128(5);

        let responses = submission.responses(participant);

        let ids: Vec<u32> = responses.iter().map(|r| r.question_id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<u32>>());
        assert_eq!(responses[4].trait_name, "energy_level");
        assert!(responses.iter().all(|r| r.participant_id == participant));
    }
}
