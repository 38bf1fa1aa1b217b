//! Importance Scoring
//!
//! Pure functions estimating an entry's future recall value.
//!
//! Scoring formula (weighted sum of the factors that are present):
//!
//!   importance = 0.20 * length_factor
//!              + 0.30 * error_density
//!              + 0.20 * code_complexity   (code kind only)
//!              + 0.20 * context_relevance (only when supplied)
//!              + 0.10                     (recency placeholder)
//!
//! Where:
//!   length_factor   = min(len / 1000, 1.0)
//!   error_density   = found error-vocabulary terms / vocabulary size
//!   code_complexity = capped sum of per-pattern contributions, see below
//!
//! The sum is deliberately NOT re-normalized: a complex code memory can
//! score slightly above other kinds. True recency is recomputed inside the
//! eviction comparison, never stored back onto the entry.

use crate::config::CompiledHeuristics;
use crate::entry::{CompressContext, MemoryKind};

const LENGTH_WEIGHT: f32 = 0.20;
const ERROR_WEIGHT: f32 = 0.30;
const COMPLEXITY_WEIGHT: f32 = 0.20;
const RELEVANCE_WEIGHT: f32 = 0.20;
const RECENCY_PLACEHOLDER: f32 = 0.10;

/// Length normalization denominator: texts at or above this many bytes
/// saturate the length factor.
const LENGTH_SATURATION: f32 = 1000.0;

/// Per-pattern cap on a single complexity contribution.
const COMPLEXITY_FACTOR_CAP: f32 = 0.5;

/// Compute the importance score for raw content.
pub fn importance_score(
    text: &str,
    kind: MemoryKind,
    context: Option<&CompressContext>,
    heuristics: &CompiledHeuristics,
) -> f32 {
    let mut score = 0.0;

    let length_factor = (text.len() as f32 / LENGTH_SATURATION).min(1.0);
    score += length_factor * LENGTH_WEIGHT;

    score += error_density(text, heuristics) * ERROR_WEIGHT;

    if kind == MemoryKind::Code {
        score += code_complexity(text, heuristics) * COMPLEXITY_WEIGHT;
    }

    // Omitted relevance contributes nothing: "no signal" is distinct from
    // an explicitly low signal.
    if let Some(relevance) = context.and_then(|c| c.relevance) {
        score += relevance * RELEVANCE_WEIGHT;
    }

    score += RECENCY_PLACEHOLDER;

    score
}

/// Fraction of the error vocabulary found anywhere in the text,
/// case-insensitive, capped at 1.0.
fn error_density(text: &str, heuristics: &CompiledHeuristics) -> f32 {
    if heuristics.error_keywords.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let found = heuristics
        .error_keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count();
    (found as f32 / heuristics.error_keywords.len() as f32).min(1.0)
}

/// Code complexity in `[0, 1]`: each pattern contributes
/// `min(match_count * weight, 0.5)`, and the overall sum is capped at 1.0.
pub fn code_complexity(code: &str, heuristics: &CompiledHeuristics) -> f32 {
    let mut total = 0.0;
    for (pattern, weight) in &heuristics.complexity {
        let matches = pattern.find_iter(code).count();
        total += (matches as f32 * weight).min(COMPLEXITY_FACTOR_CAP);
    }
    total.min(1.0)
}

// ============================================================================
// Tests
// ============================================================================
