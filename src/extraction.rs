//! Entity Extraction
//!
//! Type-dispatched extraction of salient tokens from raw text: identifiers
//! from code, error classes and file paths from diagnostics, quoted and
//! code-span terms from everything else. Results are deduplicated and
//! capped; order carries no meaning.

use crate::config::CompiledHeuristics;
use crate::entry::MemoryKind;

/// Hard cap on the entity set of a single entry.
pub const MAX_ENTITIES: usize = 20;

/// Cap on bare capitalized-word tokens picked up by the generic path.
const MAX_CAPITALIZED_TOKENS: usize = 10;

/// Extract up to [`MAX_ENTITIES`] salient tokens from raw content.
pub fn extract_entities(
    text: &str,
    kind: MemoryKind,
    heuristics: &CompiledHeuristics,
) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();

    match kind {
        MemoryKind::Code => {
            for (pattern, category) in &heuristics.code_entities {
                for caps in pattern.captures_iter(text) {
                    if let Some(name) = caps.get(1) {
                        entities.push(format!("{}:{}", category, name.as_str()));
                    }
                }
            }
        }
        MemoryKind::Error => {
            for m in heuristics.error_token.find_iter(text) {
                entities.push(m.as_str().to_string());
            }
            for caps in heuristics.error_file_ref.captures_iter(text) {
                if let Some(path) = caps.get(1) {
                    entities.push(format!("file:{}", path.as_str()));
                }
            }
        }
        _ => {
            for caps in heuristics.quoted.captures_iter(text) {
                if let Some(quoted) = caps.get(1) {
                    entities.push(quoted.as_str().to_string());
                }
            }
            for caps in heuristics.backticked.captures_iter(text) {
                if let Some(span) = caps.get(1) {
                    entities.push(span.as_str().to_string());
                }
            }
            let capitalized: Vec<String> = heuristics
                .capitalized
                .find_iter(text)
                .take(MAX_CAPITALIZED_TOKENS)
                .map(|m| m.as_str().to_string())
                .collect();
            entities.extend(capitalized);
        }
    }

    dedup_preserving_order(entities, MAX_ENTITIES)
}

fn dedup_preserving_order(entities: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for entity in entities {
        if seen.insert(entity.clone()) {
            out.push(entity);
            if out.len() == cap {
                break;
            }
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
