// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, MatchResult, QueryAnalysis, ScoringWeights, SkillMatch, StrategyLimits, Urgency};
pub use requests::{MatchRequest, SuggestRequest};
pub use responses::{ErrorResponse, HealthResponse, SuggestResponse};
