//! Rooms Match - AI-assisted skill matching service for the Rooms collaboration app
//!
//! Matches free-text help requests against a caller-supplied candidate pool
//! through a three-tier strategy chain: completion-service ranking for small
//! pools, a deterministic prefilter plus reduced-pool ranking for large ones,
//! and a fully deterministic keyword fallback that keeps the service useful
//! when the completion dependency is down.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{keyword_analysis, MatchStrategy, SkillMatcher, SuggestionGenerator};
pub use models::{Candidate, MatchResult, QueryAnalysis, ScoringWeights, SkillMatch, StrategyLimits, Urgency};
pub use services::{CompletionService, LlmClient, LlmError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let analysis = keyword_analysis("react help");
        assert!(analysis.skills.contains(&"react".to_string()));
    }
}
