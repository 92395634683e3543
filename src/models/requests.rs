use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Quiz submission
///
/// `answers` maps question id to the chosen option value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub answers: BTreeMap<u32, String>,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1))]
    pub password: String,
}
