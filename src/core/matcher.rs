use crate::core::analyzer::{keyword_analysis, QueryAnalyzer};
use crate::core::filters::reduce_pool;
use crate::core::ranker::DetailedRanker;
use crate::core::scoring::calculate_relevance;
use crate::core::suggestions::fallback_suggestions;
use crate::models::{Candidate, MatchResult, ScoringWeights, SkillMatch, StrategyLimits};
use crate::services::CompletionService;
use std::sync::Arc;

/// Ranking strategy chosen for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Completion-service ranking over the full pool
    Detailed,
    /// Deterministic prefilter + pool reduction, then Detailed
    Hybrid,
    /// Fully deterministic keyword ranking, no network
    Basic,
}

/// Matching orchestrator - single entry point for the strategy chain
///
/// # Strategy chain
/// 1. Analyze the query (degrades internally, cannot fail the call)
/// 2. Route by pool size: Detailed for small pools, Hybrid for large ones
/// 3. Any error escaping the ranker lands in the Basic strategy
///
/// Holds no per-call state; concurrent calls share nothing mutable.
pub struct SkillMatcher {
    analyzer: QueryAnalyzer,
    ranker: DetailedRanker,
    weights: ScoringWeights,
    limits: StrategyLimits,
}

impl SkillMatcher {
    pub fn new(
        llm: Arc<dyn CompletionService>,
        weights: ScoringWeights,
        limits: StrategyLimits,
    ) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(llm.clone()),
            ranker: DetailedRanker::new(llm),
            weights,
            limits,
        }
    }

    pub fn with_defaults(llm: Arc<dyn CompletionService>) -> Self {
        Self::new(llm, ScoringWeights::default(), StrategyLimits::default())
    }

    /// Strategy selected for a pool of the given size
    pub fn select_strategy(&self, pool_len: usize) -> MatchStrategy {
        if pool_len <= self.limits.detailed_pool_max {
            MatchStrategy::Detailed
        } else {
            MatchStrategy::Hybrid
        }
    }

    /// Match a help query against a candidate pool
    ///
    /// Always returns a structurally valid result; loss of network, malformed
    /// model output, and rate limiting are all absorbed by the Basic fallback.
    pub async fn match_candidates(
        &self,
        query: &str,
        pool: &[Candidate],
        max_results: usize,
    ) -> MatchResult {
        let analysis = self.analyzer.analyze(query).await;
        let strategy = self.select_strategy(pool.len());

        tracing::debug!(
            "Matching {} candidates via {:?} (skills: {:?}, tools: {:?})",
            pool.len(),
            strategy,
            analysis.skills,
            analysis.tools
        );

        let attempt = match strategy {
            MatchStrategy::Detailed => {
                self.ranker.rank(query, &analysis, pool, max_results).await
            }
            MatchStrategy::Hybrid => {
                let reduced = reduce_pool(pool, &analysis, self.limits.hybrid_pool_cap);
                tracing::debug!(
                    "Prefilter reduced pool from {} to {} candidates",
                    pool.len(),
                    reduced.len()
                );
                self.ranker.rank(query, &analysis, &reduced, max_results).await
            }
            // Basic is never routed to directly; it is the fallback below
            MatchStrategy::Basic => return self.basic_rank(query, pool, max_results),
        };

        match attempt {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("{:?} ranking failed, falling back to basic: {}", strategy, e);
                self.basic_rank(query, pool, max_results)
            }
        }
    }

    /// Basic strategy - deterministic ranking from the raw query
    ///
    /// Re-derives terms with the keyword extractor, ignoring any prior
    /// analysis, so the result depends only on (query, pool).
    pub fn basic_rank(&self, query: &str, pool: &[Candidate], max_results: usize) -> MatchResult {
        let analysis = keyword_analysis(query);

        let mut matches: Vec<SkillMatch> = pool
            .iter()
            .filter_map(|candidate| {
                let breakdown =
                    calculate_relevance(candidate, &analysis.skills, &analysis.tools, &self.weights);

                if breakdown.score > 0.0 || candidate.is_available {
                    Some(SkillMatch {
                        candidate_id: candidate.id.clone(),
                        relevance_score: breakdown.score,
                        matching_skills: breakdown.matching_skills,
                        matching_tools: breakdown.matching_tools,
                        availability: candidate.is_available,
                        help_score: candidate.reputation(),
                        reasoning: breakdown.reasoning,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps pool order on ties
        matches.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(max_results);

        MatchResult {
            matches,
            extracted_skills: analysis.skills,
            extracted_tools: analysis.tools,
            confidence: 0.5,
            suggestions: fallback_suggestions(),
        }
    }
}
