// Service exports
pub mod llm;

pub use llm::{extract_json, CompletionService, LlmClient, LlmError};
