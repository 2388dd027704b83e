use crate::models::{Candidate, MatchResult, QueryAnalysis, SkillMatch};
use crate::services::{extract_json, CompletionService, LlmError};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Advisory weighting rubric handed to the model as prompt guidance
///
/// Never enforced in code: the model's own judgment produces each
/// relevanceScore, and this path only validates structure.
const RANKING_RUBRIC: &str = "Weigh each candidate roughly as follows: \
direct skill/tool match 40%, availability 20%, reputation (helpScore) 15%, \
recent activity 15%, skill complementarity 10%.";

/// Detailed strategy - completion-service-backed ranking of a candidate pool
pub struct DetailedRanker {
    llm: Arc<dyn CompletionService>,
}

impl DetailedRanker {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    /// Rank a pool against the query and its analysis
    ///
    /// Errors (transport, quota, malformed output) propagate so the
    /// orchestrator can fall through to the deterministic strategy.
    pub async fn rank(
        &self,
        query: &str,
        analysis: &QueryAnalysis,
        pool: &[Candidate],
        max_results: usize,
    ) -> Result<MatchResult, LlmError> {
        let prompt = build_ranking_prompt(query, analysis, pool);
        let raw = self.llm.complete(&prompt).await?;
        parse_ranking(&raw, analysis, pool, max_results)
    }
}

/// Compact per-candidate summary included in the ranking prompt
fn candidate_summary(candidate: &Candidate) -> serde_json::Value {
    serde_json::json!({
        "id": candidate.id,
        "name": candidate.name,
        "skills": candidate.skills,
        "tools": candidate.tools,
        "isAvailable": candidate.is_available,
        "helpScore": candidate.reputation(),
        "lastActive": candidate.last_active,
    })
}

fn build_ranking_prompt(query: &str, analysis: &QueryAnalysis, pool: &[Candidate]) -> String {
    let summaries: Vec<serde_json::Value> = pool.iter().map(candidate_summary).collect();
    let summaries_json =
        serde_json::to_string(&summaries).unwrap_or_else(|_| "[]".to_string());
    let analysis_json =
        serde_json::to_string(analysis).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Rank these candidate helpers for a help request.

Help request: "{query}"
Request analysis: {analysis_json}
Candidates: {summaries_json}

{RANKING_RUBRIC}

Respond with ONLY a JSON object in this exact shape:
{{"matches": [{{"candidateId": "...", "relevanceScore": 0.0, "matchingSkills": ["..."], "matchingTools": ["..."], "reasoning": "one sentence"}}], "suggestions": ["optional tips to improve the request"]}}

Order matches from best to worst. Include only candidates worth suggesting.
"#
    )
}

#[derive(Debug, Deserialize)]
struct RawRanking {
    #[serde(default)]
    matches: Vec<RawMatch>,
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(rename = "candidateId", default)]
    candidate_id: String,
    #[serde(rename = "relevanceScore")]
    relevance_score: Option<f64>,
    #[serde(rename = "matchingSkills", default)]
    matching_skills: Vec<String>,
    #[serde(rename = "matchingTools", default)]
    matching_tools: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

/// Validate and coerce the model's ranking output into a MatchResult
///
/// Entries with a missing/unknown candidate id or a missing/negative score are
/// dropped; surviving scores are clamped to [0,1]; availability and helpScore
/// are re-attached from the original pool rather than trusted from the echo.
fn parse_ranking(
    raw: &str,
    analysis: &QueryAnalysis,
    pool: &[Candidate],
    max_results: usize,
) -> Result<MatchResult, LlmError> {
    let ranking: RawRanking = serde_json::from_str(extract_json(raw)).map_err(|e| {
        tracing::debug!("Unparseable ranking response: {}", raw);
        LlmError::InvalidResponse(format!("Failed to parse ranking: {}", e))
    })?;

    let by_id: HashMap<&str, &Candidate> =
        pool.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut matches: Vec<SkillMatch> = ranking
        .matches
        .into_iter()
        .filter_map(|m| {
            if m.candidate_id.is_empty() {
                return None;
            }
            let candidate = by_id.get(m.candidate_id.as_str())?;
            let score = match m.relevance_score {
                Some(s) if s >= 0.0 => s.min(1.0),
                _ => return None,
            };

            Some(SkillMatch {
                candidate_id: m.candidate_id,
                relevance_score: score,
                matching_skills: m.matching_skills,
                matching_tools: m.matching_tools,
                availability: candidate.is_available,
                help_score: candidate.reputation(),
                reasoning: m.reasoning,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(max_results);

    Ok(MatchResult {
        matches,
        extracted_skills: analysis.skills.clone(),
        extracted_tools: analysis.tools.clone(),
        confidence: analysis.confidence.clamp(0.0, 1.0),
        suggestions: ranking.suggestions,
    })
}
