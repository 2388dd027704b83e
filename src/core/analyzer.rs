use crate::core::keywords::extract_keywords;
use crate::models::{QueryAnalysis, Urgency};
use crate::services::{extract_json, CompletionService, LlmError};
use std::sync::Arc;

/// Query Analyzer - turns a free-text help request into a structured extraction
///
/// The completion service is treated as an optional optimization layer: any
/// transport or parse failure degrades to the deterministic keyword fallback,
/// so `analyze` never fails.
pub struct QueryAnalyzer {
    llm: Arc<dyn CompletionService>,
}

impl QueryAnalyzer {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    /// Analyze a query, degrading to keyword extraction on any failure
    pub async fn analyze(&self, query: &str) -> QueryAnalysis {
        match self.analyze_with_llm(query).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Query analysis failed, using keyword fallback: {}", e);
                keyword_analysis(query)
            }
        }
    }

    async fn analyze_with_llm(&self, query: &str) -> Result<QueryAnalysis, LlmError> {
        let prompt = build_analysis_prompt(query);
        let raw = self.llm.complete(&prompt).await?;
        parse_analysis(&raw)
    }
}

/// Deterministic extraction from the fixed vocabularies, no network
pub fn keyword_analysis(query: &str) -> QueryAnalysis {
    let (skills, tools) = extract_keywords(query);

    QueryAnalysis {
        skills,
        tools,
        intent: query.to_string(),
        urgency: Urgency::Medium,
        confidence: 0.5,
    }
}

fn build_analysis_prompt(query: &str) -> String {
    format!(
        r#"Analyze this help request and extract structured information.

Help request: "{query}"

Common skill categories: programming languages and frameworks, design, writing,
languages, music, cooking, crafts, tutoring subjects. Common tool categories:
developer tools, creative software, office software, household and workshop
equipment. These are guidance, not a hard constraint.

Respond with ONLY a JSON object in this exact shape:
{{"skills": ["..."], "tools": ["..."], "intent": "one sentence restating what the requester wants", "urgency": "low|medium|high", "confidence": 0.0}}
"#
    )
}

fn parse_analysis(raw: &str) -> Result<QueryAnalysis, LlmError> {
    let mut analysis: QueryAnalysis = serde_json::from_str(extract_json(raw)).map_err(|e| {
        tracing::debug!("Unparseable analysis response: {}", raw);
        LlmError::InvalidResponse(format!("Failed to parse analysis: {}", e))
    })?;

    analysis.confidence = analysis.confidence.clamp(0.0, 1.0);

    Ok(analysis)
}
