//! Search and Ranking
//!
//! Linear scan over the store producing a relevance-ranked subset.
//!
//! Scoring formula per entry (after the optional kind filter):
//!
//!   score = 1.0  if the query occurs in the compressed text
//!         + 0.5  if the query occurs in any entity (first match only)
//!         + importance * 0.3, added only when at least one hit accrued
//!
//! An entry with no substring hit in content or entities is excluded
//! entirely — importance alone never ranks an unmatched entry. Matching is
//! case-insensitive substring containment; there is no semantic similarity
//! here by design.

use serde::{Deserialize, Serialize};

use crate::entry::{MemoryEntry, MemoryKind};
use crate::store::MemoryStore;

const CONTENT_HIT_SCORE: f32 = 1.0;
const ENTITY_HIT_SCORE: f32 = 0.5;
const IMPORTANCE_BONUS_WEIGHT: f32 = 0.3;

/// Characters of compressed text included in a hit's preview.
const PREVIEW_CHARS: usize = 100;
/// Entities included on a hit.
const HIT_ENTITY_LIMIT: usize = 5;

// ============================================================================
// Request / result types
// ============================================================================

/// A search request over the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Restrict results to one kind.
    #[serde(default)]
    pub kind: Option<MemoryKind>,
    /// Maximum results returned.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

impl SearchRequest {
    /// A request with the default limit and no kind filter.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: None,
            limit: default_limit(),
        }
    }

    /// Restrict the request to a single kind.
    pub fn with_kind(mut self, kind: MemoryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A ranked summary of one matching entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: MemoryKind,
    pub importance: f32,
    pub compression_ratio: f32,
    /// Truncated compressed-text preview.
    pub preview: String,
    /// Up to five of the entry's entities.
    pub entities: Vec<String>,
    pub score: f32,
}

// ============================================================================
// Scoring
// ============================================================================

/// Score one entry against a lowercased query, `None` when nothing matched.
pub fn match_score(entry: &MemoryEntry, query_lower: &str) -> Option<f32> {
    let mut score = 0.0;

    if entry.compressed_text.to_lowercase().contains(query_lower) {
        score += CONTENT_HIT_SCORE;
    }

    if entry
        .entities
        .iter()
        .any(|entity| entity.to_lowercase().contains(query_lower))
    {
        score += ENTITY_HIT_SCORE;
    }

    if score > 0.0 {
        Some(score + entry.importance * IMPORTANCE_BONUS_WEIGHT)
    } else {
        None
    }
}

/// Search the store, returning hits sorted by descending score.
pub fn search_memories(store: &MemoryStore, request: &SearchRequest) -> Vec<SearchHit> {
    let query_lower = request.query.to_lowercase();

    let mut hits: Vec<SearchHit> = store
        .entries()
        .filter(|entry| request.kind.map_or(true, |kind| entry.kind == kind))
        .filter_map(|entry| match_score(entry, &query_lower).map(|score| to_hit(entry, score)))
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(request.limit);
    hits
}

fn to_hit(entry: &MemoryEntry, score: f32) -> SearchHit {
    SearchHit {
        id: entry.id.clone(),
        kind: entry.kind,
        importance: entry.importance,
        compression_ratio: entry.compression_ratio,
        preview: preview(&entry.compressed_text),
        entities: entry.entities.iter().take(HIT_ENTITY_LIMIT).cloned().collect(),
        score,
    }
}

/// First [`PREVIEW_CHARS`] characters of the compressed text, with a
/// trailing marker when truncated.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

// ============================================================================
// Tests
// ============================================================================
