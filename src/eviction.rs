//! Eviction Policy
//!
//! Capacity-bounded eviction over the store's entries.
//!
//! Eviction formula, computed only at eviction time (never stored back):
//!
//!   combined = importance * 0.7 + recency * 0.3
//!   recency  = max(0, 1 - age / 7 days)
//!
//! A linear decay reaching zero at exactly seven days old, clamped at zero
//! beyond. The lowest-combined entries are removed until the store is back
//! at capacity; ties resolve to some lowest-scoring subset of the correct
//! size.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entry::MemoryEntry;

const IMPORTANCE_WEIGHT: f32 = 0.7;
const RECENCY_WEIGHT: f32 = 0.3;

/// The decay window after which recency bottoms out, in seconds.
const DECAY_WINDOW_SECS: f32 = 7.0 * 24.0 * 3600.0;

/// Linear recency decay: 1.0 at creation, 0.0 at seven days and beyond.
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let age_secs = (now - created_at).num_seconds() as f32;
    (1.0 - age_secs / DECAY_WINDOW_SECS).max(0.0)
}

/// Importance blended with recency decay, used only for eviction ranking.
pub fn combined_score(entry: &MemoryEntry, now: DateTime<Utc>) -> f32 {
    entry.importance * IMPORTANCE_WEIGHT + recency_score(entry.created_at, now) * RECENCY_WEIGHT
}

/// Select the ids of the `excess` lowest-combined entries.
pub(crate) fn select_evictions(
    entries: &HashMap<String, MemoryEntry>,
    now: DateTime<Utc>,
    excess: usize,
) -> Vec<String> {
    let mut scored: Vec<(f32, &String)> = entries
        .iter()
        .map(|(id, entry)| (combined_score(entry, now), id))
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(excess)
        .map(|(_, id)| id.clone())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
