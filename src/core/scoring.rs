use crate::core::keywords::substring_related;
use crate::models::{Candidate, ScoringWeights};

/// Per-candidate output of the deterministic relevance formula
#[derive(Debug, Clone)]
pub struct RelevanceBreakdown {
    pub score: f64,
    pub matching_skills: Vec<String>,
    pub matching_tools: Vec<String>,
    pub reasoning: String,
}

/// Calculate a relevance score (0-1) for a candidate against extracted terms
///
/// Scoring formula:
/// score = min(1, matching_skills * 0.4
///              + matching_tools * 0.3
///              + is_available * 0.2
///              + help_score/100 * 0.1)
pub fn calculate_relevance(
    candidate: &Candidate,
    skills: &[String],
    tools: &[String],
    weights: &ScoringWeights,
) -> RelevanceBreakdown {
    let matching_skills: Vec<String> = candidate
        .skills
        .iter()
        .filter(|s| skills.iter().any(|q| substring_related(s, q)))
        .cloned()
        .collect();

    let matching_tools: Vec<String> = candidate
        .tools
        .iter()
        .filter(|t| tools.iter().any(|q| substring_related(t, q)))
        .cloned()
        .collect();

    let availability_score = if candidate.is_available { 1.0 } else { 0.0 };
    let reputation_score = candidate.reputation() as f64 / 100.0;

    let total = matching_skills.len() as f64 * weights.skill
        + matching_tools.len() as f64 * weights.tool
        + availability_score * weights.availability
        + reputation_score * weights.reputation;

    let score = total.clamp(0.0, 1.0);

    let reasoning = format!(
        "Matched {} skill(s) and {} tool(s); {}",
        matching_skills.len(),
        matching_tools.len(),
        if candidate.is_available {
            "available to help now"
        } else {
            "currently unavailable"
        }
    );

    RelevanceBreakdown {
        score,
        matching_skills,
        matching_tools,
        reasoning,
    }
}
