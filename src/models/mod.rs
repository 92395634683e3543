// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Match, NewMatch, PairScore, Participant, Response, ScoringWeights, TraitCategory, UnknownTrait};
pub use requests::{AdminLoginRequest, SubmitQuizRequest};
pub use responses::{
    AdminLoginResponse, ClearedResponse, ErrorResponse, HealthResponse, MatchRunResponse, RevealStepResponse,
    StatsResponse, SubmitQuizResponse,
};
