use crate::core::keywords::substring_related;
use crate::models::{Candidate, QueryAnalysis};

/// Check if a candidate survives the hybrid prefilter
///
/// A candidate qualifies if any of its skills has a substring relation (either
/// direction, case-insensitive) with any extracted skill, the same holds for
/// tools, or the candidate is available. Availability qualifies on its own so
/// available-but-mismatched helpers are not excluded outright.
#[inline]
pub fn passes_prefilter(candidate: &Candidate, analysis: &QueryAnalysis) -> bool {
    if candidate.is_available {
        return true;
    }

    let skill_hit = candidate
        .skills
        .iter()
        .any(|s| analysis.skills.iter().any(|q| substring_related(s, q)));
    if skill_hit {
        return true;
    }

    candidate
        .tools
        .iter()
        .any(|t| analysis.tools.iter().any(|q| substring_related(t, q)))
}

/// Reduce a large pool to at most `cap` candidates for detailed ranking
///
/// Filter order is preserved; survivors are not re-sorted before truncation.
pub fn reduce_pool(pool: &[Candidate], analysis: &QueryAnalysis, cap: usize) -> Vec<Candidate> {
    let mut reduced: Vec<Candidate> = pool
        .iter()
        .filter(|c| passes_prefilter(c, analysis))
        .cloned()
        .collect();

    reduced.truncate(cap);
    reduced
}
