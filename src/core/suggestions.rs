use crate::services::{extract_json, CompletionService, LlmError};
use std::sync::Arc;

/// Generic advice returned when the completion service cannot be consulted
pub const FALLBACK_TIPS: [&str; 3] = [
    "Mention the specific skill or subject you need help with",
    "Name any tools or technologies involved, like a language or a device",
    "Say how urgent the request is and roughly how much time it needs",
];

/// The fixed fallback tip list as owned strings
pub fn fallback_suggestions() -> Vec<String> {
    FALLBACK_TIPS.iter().map(|s| s.to_string()).collect()
}

/// Suggestion Generator - tips to sharpen a vague help request
pub struct SuggestionGenerator {
    llm: Arc<dyn CompletionService>,
}

impl SuggestionGenerator {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    /// Produce 3-5 suggestions, never failing and never returning empty
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        match self.suggest_with_llm(query).await {
            Ok(suggestions) if !suggestions.is_empty() => suggestions,
            Ok(_) => fallback_suggestions(),
            Err(e) => {
                tracing::warn!("Suggestion generation failed, using static tips: {}", e);
                fallback_suggestions()
            }
        }
    }

    async fn suggest_with_llm(&self, query: &str) -> Result<Vec<String>, LlmError> {
        let prompt = build_suggestion_prompt(query);
        let raw = self.llm.complete(&prompt).await?;

        serde_json::from_str(extract_json(&raw)).map_err(|e| {
            tracing::debug!("Unparseable suggestion response: {}", raw);
            LlmError::InvalidResponse(format!("Failed to parse suggestions: {}", e))
        })
    }
}

fn build_suggestion_prompt(query: &str) -> String {
    format!(
        r#"A user wrote this help request: "{query}"

Give 3 to 5 specific, actionable suggestions to make the request easier to
match with a helper. Respond with ONLY a JSON array of strings.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_three_tips() {
        let tips = fallback_suggestions();
        assert_eq!(tips.len(), 3);
        assert!(tips.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_prompt_contains_query() {
        let prompt = build_suggestion_prompt("help");
        assert!(prompt.contains("\"help\""));
        assert!(prompt.contains("JSON array"));
    }
}
