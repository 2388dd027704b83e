// Integration tests for Rooms Match
//
// The completion dependency is exercised through stub CompletionService
// implementations: a scripted stub that answers analysis/ranking/suggestion
// prompts, a malformed stub, and a failing stub. The HTTP client itself is
// covered with mockito.

use async_trait::async_trait;
use rooms_match::models::{Candidate, ScoringWeights, StrategyLimits};
use rooms_match::services::{CompletionService, LlmError};
use rooms_match::{LlmClient, MatchStrategy, SkillMatcher, SuggestionGenerator};
use std::sync::{Arc, Mutex};

/// Stub that answers each prompt kind with a scripted body and records
/// every prompt it sees
struct ScriptedService {
    analysis: String,
    ranking: String,
    suggestions: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn new(analysis: &str, ranking: &str, suggestions: &str) -> Self {
        Self {
            analysis: analysis.to_string(),
            ranking: ranking.to_string(),
            suggestions: suggestions.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn ranking_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with("Rank these"))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if prompt.starts_with("Analyze this") {
            Ok(self.analysis.clone())
        } else if prompt.starts_with("Rank these") {
            Ok(self.ranking.clone())
        } else {
            Ok(self.suggestions.clone())
        }
    }
}

/// Stub that always fails, as if the network or quota were gone
struct UnreachableService;

#[async_trait]
impl CompletionService for UnreachableService {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::ApiError("503 Service Unavailable".to_string()))
    }
}

/// Stub that answers every prompt with prose instead of JSON
struct ProseService;

#[async_trait]
impl CompletionService for ProseService {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok("Happy to help! Let me think about that...".to_string())
    }
}

fn candidate(
    id: &str,
    skills: Vec<&str>,
    tools: Vec<&str>,
    available: bool,
    help_score: u32,
) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("User {}", id),
        skills: skills.into_iter().map(String::from).collect(),
        tools: tools.into_iter().map(String::from).collect(),
        is_available: available,
        help_score: Some(help_score),
        last_active: None,
    }
}

const ANALYSIS_BODY: &str =
    r#"{"skills": ["rust"], "tools": [], "intent": "fix a rust build", "urgency": "high", "confidence": 0.9}"#;

const SUGGESTIONS_BODY: &str =
    r#"["Name the crate that fails", "Include the compiler error", "Say which platform you build on"]"#;

fn ranking_body(ids_and_scores: &[(&str, f64)]) -> String {
    let entries: Vec<String> = ids_and_scores
        .iter()
        .map(|(id, score)| {
            format!(
                r#"{{"candidateId": "{}", "relevanceScore": {}, "matchingSkills": ["rust"], "matchingTools": [], "reasoning": "overlap"}}"#,
                id, score
            )
        })
        .collect();
    format!(r#"{{"matches": [{}], "suggestions": []}}"#, entries.join(","))
}

#[tokio::test]
async fn test_detailed_path_small_pool() {
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        &ranking_body(&[("u1", 0.9), ("u2", 0.4)]),
        SUGGESTIONS_BODY,
    ));
    let matcher = SkillMatcher::with_defaults(service.clone());

    let pool = vec![
        candidate("u1", vec!["rust"], vec![], true, 80),
        candidate("u2", vec!["rust"], vec![], false, 10),
    ];

    let result = matcher.match_candidates("my rust build fails", &pool, 10).await;

    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.matches[0].candidate_id, "u1");
    // helpScore comes from the pool, not the model echo
    assert_eq!(result.matches[0].help_score, 80);
    assert_eq!(result.confidence, 0.9);
    assert_eq!(result.extracted_skills, vec!["rust"]);

    // A 2-candidate pool never goes through the prefilter
    let prompts = service.ranking_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"u1\""));
    assert!(prompts[0].contains("\"u2\""));
}

#[tokio::test]
async fn test_hybrid_path_reduces_pool_before_ranking() {
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        &ranking_body(&[("hit0", 0.8)]),
        SUGGESTIONS_BODY,
    ));
    let matcher = SkillMatcher::with_defaults(service.clone());

    // 80 candidates, only 5 pass the prefilter (skill overlap, none available)
    let mut pool: Vec<Candidate> = (0..75)
        .map(|i| candidate(&format!("miss{}", i), vec!["pottery"], vec![], false, 0))
        .collect();
    for i in 0..5 {
        pool.push(candidate(&format!("hit{}", i), vec!["rust"], vec![], false, 0));
    }

    let result = matcher.match_candidates("my rust build fails", &pool, 10).await;

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].candidate_id, "hit0");

    // The ranking prompt saw exactly the 5 qualifiers, not 30 and not 80
    let prompts = service.ranking_prompts();
    assert_eq!(prompts.len(), 1);
    for i in 0..5 {
        assert!(prompts[0].contains(&format!("\"hit{}\"", i)));
    }
    assert!(!prompts[0].contains("\"miss0\""));
}

#[tokio::test]
async fn test_strategy_boundary_at_fifty() {
    let matcher = SkillMatcher::with_defaults(Arc::new(UnreachableService));

    assert_eq!(matcher.select_strategy(50), MatchStrategy::Detailed);
    assert_eq!(matcher.select_strategy(51), MatchStrategy::Hybrid);
}

#[tokio::test]
async fn test_unreachable_service_falls_back_to_basic() {
    let matcher = SkillMatcher::with_defaults(Arc::new(UnreachableService));

    let pool = vec![
        candidate("u1", vec!["React"], vec![], true, 50),
        candidate("u2", vec![], vec!["Docker"], false, 0),
    ];

    let result = matcher.match_candidates("need react help", &pool, 10).await;

    // u1: 0.4 + 0.2 + 0.05 = 0.65; u2 scores 0 and is unavailable
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].candidate_id, "u1");
    assert!((result.matches[0].relevance_score - 0.65).abs() < 1e-9);
    assert_eq!(result.suggestions.len(), 3);
}

#[tokio::test]
async fn test_prose_response_falls_back_to_basic() {
    let matcher = SkillMatcher::with_defaults(Arc::new(ProseService));

    let pool = vec![candidate("u1", vec!["rust"], vec![], false, 0)];

    let result = matcher.match_candidates("rust question", &pool, 10).await;

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.extracted_skills, vec!["rust"]);
    assert_eq!(result.confidence, 0.5);
}

#[tokio::test]
async fn test_fallback_results_deterministic() {
    let matcher = SkillMatcher::with_defaults(Arc::new(UnreachableService));
    let pool: Vec<Candidate> = (0..60)
        .map(|i| candidate(&i.to_string(), vec!["rust"], vec!["git"], i % 3 == 0, (i * 2) as u32))
        .collect();

    let first = matcher.match_candidates("rust and git", &pool, 15).await;
    let second = matcher.match_candidates("rust and git", &pool, 15).await;

    let ids: Vec<&str> = first.matches.iter().map(|m| m.candidate_id.as_str()).collect();
    let ids_again: Vec<&str> = second.matches.iter().map(|m| m.candidate_id.as_str()).collect();
    assert_eq!(ids, ids_again);
    assert!(first.matches.len() <= 15);
}

#[tokio::test]
async fn test_scores_clamped_and_results_bounded() {
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        &ranking_body(&[("u0", 5.0), ("u1", 0.9), ("u2", 0.8), ("u3", 0.7)]),
        SUGGESTIONS_BODY,
    ));
    let matcher = SkillMatcher::with_defaults(service);

    let pool: Vec<Candidate> = (0..4)
        .map(|i| candidate(&format!("u{}", i), vec!["rust"], vec![], false, 0))
        .collect();

    let result = matcher.match_candidates("rust help", &pool, 3).await;

    assert_eq!(result.matches.len(), 3);
    for m in &result.matches {
        assert!(m.relevance_score >= 0.0 && m.relevance_score <= 1.0);
    }
    // The out-of-range score was clamped to 1.0 and still ranks first
    assert_eq!(result.matches[0].candidate_id, "u0");
    assert_eq!(result.matches[0].relevance_score, 1.0);
}

#[tokio::test]
async fn test_ranked_ids_always_from_pool() {
    // Model hallucinates a candidate that is not in the pool
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        &ranking_body(&[("ghost", 0.99), ("u1", 0.5)]),
        SUGGESTIONS_BODY,
    ));
    let matcher = SkillMatcher::with_defaults(service);

    let pool = vec![candidate("u1", vec!["rust"], vec![], true, 0)];

    let result = matcher.match_candidates("rust help", &pool, 10).await;

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].candidate_id, "u1");
}

#[tokio::test]
async fn test_suggest_scripted() {
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        "{}",
        SUGGESTIONS_BODY,
    ));
    let suggester = SuggestionGenerator::new(service);

    let suggestions = suggester.suggest("help").await;

    assert_eq!(suggestions.len(), 3);
    assert!(suggestions[0].contains("crate"));
}

#[tokio::test]
async fn test_suggest_unreachable_returns_fixed_tips() {
    let suggester = SuggestionGenerator::new(Arc::new(UnreachableService));

    let suggestions = suggester.suggest("help").await;

    assert_eq!(suggestions.len(), 3);
    assert!(!suggestions.iter().any(|s| s.is_empty()));
}

#[tokio::test]
async fn test_suggest_prose_returns_fixed_tips() {
    let suggester = SuggestionGenerator::new(Arc::new(ProseService));

    let suggestions = suggester.suggest("help").await;

    assert_eq!(suggestions.len(), 3);
}

#[tokio::test]
async fn test_custom_limits_respected() {
    let service = Arc::new(ScriptedService::new(
        ANALYSIS_BODY,
        &ranking_body(&[("u0", 0.9)]),
        SUGGESTIONS_BODY,
    ));
    let matcher = SkillMatcher::new(
        service.clone(),
        ScoringWeights::default(),
        StrategyLimits {
            detailed_pool_max: 5,
            hybrid_pool_cap: 3,
        },
    );

    // 8 candidates with a 5-candidate detailed threshold: hybrid, capped at 3
    let pool: Vec<Candidate> = (0..8)
        .map(|i| candidate(&format!("u{}", i), vec!["rust"], vec![], false, 0))
        .collect();

    matcher.match_candidates("rust help", &pool, 10).await;

    let prompts = service.ranking_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"u0\""));
    assert!(prompts[0].contains("\"u2\""));
    assert!(!prompts[0].contains("\"u3\""));
}

#[tokio::test]
async fn test_llm_client_against_mock_server() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": "{\"skills\": []}"}}]
    });

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "test_key".to_string(), "test-model".to_string(), 5);
    let completion = client.complete("analyze this").await.unwrap();

    assert_eq!(completion, "{\"skills\": []}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_llm_client_surfaces_http_errors() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "test_key".to_string(), "test-model".to_string(), 5);
    let result = client.complete("analyze this").await;

    assert!(matches!(result, Err(LlmError::ApiError(_))));
}

#[tokio::test]
async fn test_llm_client_rejects_missing_content() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let client = LlmClient::new(server.url(), "test_key".to_string(), "test-model".to_string(), 5);
    let result = client.complete("analyze this").await;

    assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
}
