use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::reveal::RevealCard;
use crate::models::domain::Match;

/// Response for a quiz submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub participant_id: Uuid,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Issued admin token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub participants: usize,
    pub matches: usize,
}

/// Outcome of a matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRunResponse {
    pub participants: usize,
    pub pairs_scored: usize,
    pub created: usize,
    pub matches: Vec<Match>,
}

/// Result of a clear/reset operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedResponse {
    pub deleted: u64,
}

/// Reveal cursor state after a number of advances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealStepResponse {
    pub position: Option<usize>,
    pub total: usize,
    pub finished: bool,
    pub card: Option<RevealCard>,
}
