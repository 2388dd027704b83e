use crate::models::domain::Candidate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to match a help query against a candidate pool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default)]
    pub pool: Vec<Candidate>,
    #[serde(default = "default_max_results")]
    #[serde(alias = "max_results", rename = "maxResults")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    10
}

/// Request for query-improvement suggestions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestRequest {
    #[validate(length(min = 1))]
    pub query: String,
}
