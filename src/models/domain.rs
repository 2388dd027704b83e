use serde::{Deserialize, Serialize};

/// A helper eligible for matching, supplied by the caller per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
    #[serde(rename = "helpScore", default)]
    pub help_score: Option<u32>,
    #[serde(rename = "lastActive", default)]
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
}

impl Candidate {
    /// Helper to get help_score as a number, defaulting to 0
    pub fn reputation(&self) -> u32 {
        self.help_score.unwrap_or(0)
    }
}

/// Structured extraction of a free-text help request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

/// Requester urgency as reported by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// One ranked candidate in a match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatch {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
    #[serde(rename = "matchingSkills")]
    pub matching_skills: Vec<String>,
    #[serde(rename = "matchingTools")]
    pub matching_tools: Vec<String>,
    pub availability: bool,
    #[serde(rename = "helpScore")]
    pub help_score: u32,
    pub reasoning: String,
}

/// Overall output of a match call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<SkillMatch>,
    #[serde(rename = "extractedSkills")]
    pub extracted_skills: Vec<String>,
    #[serde(rename = "extractedTools")]
    pub extracted_tools: Vec<String>,
    pub confidence: f64,
    pub suggestions: Vec<String>,
}

/// Weights for the deterministic relevance formula
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill: f64,
    pub tool: f64,
    pub availability: f64,
    pub reputation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            tool: 0.3,
            availability: 0.2,
            reputation: 0.1,
        }
    }
}

/// Pool-size thresholds for strategy routing
#[derive(Debug, Clone, Copy)]
pub struct StrategyLimits {
    /// Largest pool ranked directly by the completion service
    pub detailed_pool_max: usize,
    /// Cap on the prefiltered pool handed to the detailed ranker
    pub hybrid_pool_cap: usize,
}

impl Default for StrategyLimits {
    fn default() -> Self {
        Self {
            detailed_pool_max: 50,
            hybrid_pool_cap: 30,
        }
    }
}
