//! Rollup Summaries
//!
//! Aggregates a set of entries into a summary of key points, entities, and
//! decisions. Summaries live in their own unbounded collection on the store
//! and are never touched by capacity eviction — flagged as an open design
//! question rather than silently bounded here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::MemoryStore;

/// Cap on a summary's key points.
pub const MAX_KEY_POINTS: usize = 10;
/// Cap on a summary's entity union.
pub const MAX_SUMMARY_ENTITIES: usize = 15;
/// How many trailing key points of a solution entry become decisions.
const DECISION_TAIL: usize = 3;
/// Minimum trimmed line length for a key point.
const MIN_KEY_POINT_LEN: usize = 20;

// ============================================================================
// SummaryKind
// ============================================================================

/// Scope tag for a rollup summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Session,
    Task,
    Project,
}

impl SummaryKind {
    /// Convert to the wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Session => "session",
            SummaryKind::Task => "task",
            SummaryKind::Project => "project",
        }
    }

    /// Parse from a string, defaulting unrecognized values to `Session`.
    pub fn parse(s: &str) -> Self {
        match s {
            "task" => SummaryKind::Task,
            "project" => SummaryKind::Project,
            _ => SummaryKind::Session,
        }
    }
}

impl Default for SummaryKind {
    fn default() -> Self {
        Self::Session
    }
}

impl std::fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MemorySummary
// ============================================================================

/// A rollup of multiple entries' key points, entities, and decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub kind: SummaryKind,
    pub key_points: Vec<String>,
    pub entities: Vec<String>,
    /// Trailing key points of solution-kind entries, `solution:`-tagged.
    pub decisions: Vec<String>,
    /// Ids of the entries the summary was built from (as resolved).
    pub member_ids: Vec<String>,
}

/// Generate a summary id: `sum_<kind>_<unix_millis>`.
fn generate_summary_id(kind: SummaryKind, created_at: DateTime<Utc>) -> String {
    format!("sum_{}_{}", kind.as_str(), created_at.timestamp_millis())
}

// ============================================================================
// Summarizer
// ============================================================================

/// Summarize a set of entries into a stored rollup, returning its id.
///
/// When `ids` is omitted the store's recent ring is used. Ids that no
/// longer resolve (eviction may have removed them) are silently skipped.
/// Returns `None` when no entries resolve at all.
pub fn generate_summary(
    store: &mut MemoryStore,
    kind: SummaryKind,
    ids: Option<Vec<String>>,
) -> Option<String> {
    let candidate_ids = ids.unwrap_or_else(|| store.recent_ids());

    let mut key_points: Vec<String> = Vec::new();
    let mut entities: Vec<String> = Vec::new();
    let mut decisions: Vec<String> = Vec::new();
    let mut member_ids: Vec<String> = Vec::new();

    for id in &candidate_ids {
        let Some(entry) = store.get(id) else {
            continue;
        };
        member_ids.push(id.clone());

        let entry_points: Vec<String> = entry
            .compressed_text
            .lines()
            .map(str::trim)
            .filter(|line| line.len() > MIN_KEY_POINT_LEN)
            .map(str::to_string)
            .collect();

        if entry.kind == crate::entry::MemoryKind::Solution {
            let tail_start = entry_points.len().saturating_sub(DECISION_TAIL);
            decisions.extend(
                entry_points[tail_start..]
                    .iter()
                    .map(|p| format!("solution:{}", p)),
            );
        }

        for entity in &entry.entities {
            if !entities.contains(entity) {
                entities.push(entity.clone());
            }
        }

        key_points.extend(entry_points);
    }

    if member_ids.is_empty() {
        return None;
    }

    key_points.truncate(MAX_KEY_POINTS);
    entities.truncate(MAX_SUMMARY_ENTITIES);

    let now = Utc::now();
    let summary = MemorySummary {
        id: generate_summary_id(kind, now),
        created_at: now,
        kind,
        key_points,
        entities,
        decisions,
        member_ids,
    };

    let id = summary.id.clone();
    info!(id = %id, kind = %kind, members = summary.member_ids.len(), "summary generated");
    store.put_summary(summary);
    Some(id)
}

// ============================================================================
// Tests
// ============================================================================
