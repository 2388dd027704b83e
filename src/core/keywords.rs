//! Fixed vocabularies and keyword extraction for the network-free fallback path.

/// Skill labels recognized by the deterministic extractor
pub const SKILL_VOCABULARY: &[&str] = &[
    "react",
    "javascript",
    "typescript",
    "python",
    "rust",
    "java",
    "sql",
    "html",
    "css",
    "node",
    "machine learning",
    "data analysis",
    "design",
    "writing",
    "editing",
    "translation",
    "marketing",
    "accounting",
    "tutoring",
    "math",
    "physics",
    "chemistry",
    "spanish",
    "french",
    "german",
    "cooking",
    "baking",
    "gardening",
    "photography",
    "guitar",
    "piano",
    "carpentry",
    "plumbing",
    "sewing",
    "first aid",
    "yoga",
];

/// Tool labels recognized by the deterministic extractor
pub const TOOL_VOCABULARY: &[&str] = &[
    "docker",
    "kubernetes",
    "git",
    "github",
    "aws",
    "azure",
    "figma",
    "photoshop",
    "illustrator",
    "excel",
    "powerpoint",
    "notion",
    "blender",
    "arduino",
    "raspberry pi",
    "3d printer",
    "soldering iron",
    "sewing machine",
    "drill",
    "ladder",
    "lawn mower",
    "projector",
    "camera",
];

/// Extract skill and tool terms from a raw query
///
/// Matching is case-insensitive: a vocabulary term matches if the lower-cased
/// query contains it verbatim, or contains it with all non-letter characters
/// stripped (so "node.js" still hits "nodejs"-style mentions). Results keep
/// vocabulary order and are deduplicated by construction.
pub fn extract_keywords(query: &str) -> (Vec<String>, Vec<String>) {
    let query_lower = query.to_lowercase();

    let skills = vocabulary_matches(&query_lower, SKILL_VOCABULARY);
    let tools = vocabulary_matches(&query_lower, TOOL_VOCABULARY);

    (skills, tools)
}

fn vocabulary_matches(query_lower: &str, vocabulary: &[&str]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|term| {
            if query_lower.contains(*term) {
                return true;
            }
            let stripped = strip_non_letters(term);
            !stripped.is_empty() && query_lower.contains(&stripped)
        })
        .map(|term| term.to_string())
        .collect()
}

/// Drop every non-letter character from a term
#[inline]
pub fn strip_non_letters(term: &str) -> String {
    term.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Case-insensitive substring relation in either direction
///
/// Empty or whitespace-only labels never relate; `contains("")` is trivially
/// true and would match everything.
#[inline]
pub fn substring_related(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.contains(&b) || b.contains(&a)
}
