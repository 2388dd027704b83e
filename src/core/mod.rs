// Core algorithm exports
pub mod analyzer;
pub mod filters;
pub mod keywords;
pub mod matcher;
pub mod ranker;
pub mod scoring;
pub mod suggestions;

pub use analyzer::{keyword_analysis, QueryAnalyzer};
pub use filters::{passes_prefilter, reduce_pool};
pub use keywords::{extract_keywords, substring_related, SKILL_VOCABULARY, TOOL_VOCABULARY};
pub use matcher::{MatchStrategy, SkillMatcher};
pub use ranker::DetailedRanker;
pub use scoring::{calculate_relevance, RelevanceBreakdown};
pub use suggestions::{fallback_suggestions, SuggestionGenerator, FALLBACK_TIPS};
