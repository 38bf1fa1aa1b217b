//! Memory Entries
//!
//! The core data types: the open `MemoryKind` content-category enum, the
//! immutable `MemoryEntry` record, and the caller-supplied compression
//! context. Entry ids combine a SHA-256 content fingerprint with the
//! creation timestamp, so identical content submitted twice still receives
//! distinct ids.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::compression::compress_text;
use crate::config::CompiledHeuristics;
use crate::extraction::extract_entities;
use crate::scoring::importance_score;

// ============================================================================
// MemoryKind
// ============================================================================

/// Content category driving which compression/extraction strategy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Conversation,
    Code,
    Error,
    Solution,
    Context,
    Generic,
}

impl MemoryKind {
    /// Convert to the wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::Conversation => "conversation",
            MemoryKind::Code => "code",
            MemoryKind::Error => "error",
            MemoryKind::Solution => "solution",
            MemoryKind::Context => "context",
            MemoryKind::Generic => "generic",
        }
    }

    /// Parse from a string. Unrecognized values fall back to `Generic`
    /// rather than failing; every kind tag is accepted.
    pub fn parse(s: &str) -> Self {
        match s {
            "conversation" => MemoryKind::Conversation,
            "code" => MemoryKind::Code,
            "error" => MemoryKind::Error,
            "solution" => MemoryKind::Solution,
            "context" => MemoryKind::Context,
            _ => MemoryKind::Generic,
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CompressContext
// ============================================================================

/// Optional caller-supplied context for a compression request.
///
/// `relevance` feeds the importance score only when present — omission is
/// "no signal", which is scored differently from an explicit 0.0. The
/// metadata map is opaque to the engine and stored on the entry verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompressContext {
    /// Caller's relevance estimate in `[0, 1]`.
    #[serde(default)]
    pub relevance: Option<f32>,
    /// Free-form key-value context, opaque to the engine.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl CompressContext {
    /// Context carrying only a relevance signal.
    pub fn with_relevance(relevance: f32) -> Self {
        Self {
            relevance: Some(relevance),
            metadata: HashMap::new(),
        }
    }
}

// ============================================================================
// MemoryEntry
// ============================================================================

/// One compressed, scored, indexed unit of retained text.
///
/// Immutable after creation; destroyed only by eviction or a store reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub kind: MemoryKind,
    pub original_text: String,
    pub compressed_text: String,
    pub entities: Vec<String>,
    pub importance: f32,
    pub compression_ratio: f32,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl MemoryEntry {
    /// Run the full compression pipeline over raw content at a given instant.
    ///
    /// Scores importance, compresses by kind, extracts entities, and stamps
    /// the id. Pure with respect to the store — callers commit the result
    /// separately, so the pipeline can run outside the store's critical
    /// section.
    pub fn from_content_at(
        content: &str,
        kind: MemoryKind,
        context: Option<&CompressContext>,
        heuristics: &CompiledHeuristics,
        now: DateTime<Utc>,
    ) -> Self {
        let importance = importance_score(content, kind, context, heuristics);
        let compressed_text = compress_text(content, kind, heuristics);
        let entities = extract_entities(content, kind, heuristics);

        let compression_ratio = if content.is_empty() {
            1.0
        } else {
            compressed_text.len() as f32 / content.len() as f32
        };

        Self {
            id: generate_entry_id(content, now),
            created_at: now,
            kind,
            original_text: content.to_string(),
            compressed_text,
            entities,
            importance,
            compression_ratio,
            metadata: context.map(|c| c.metadata.clone()).unwrap_or_default(),
        }
    }

    /// Run the compression pipeline stamped with the current time.
    pub fn from_content(
        content: &str,
        kind: MemoryKind,
        context: Option<&CompressContext>,
        heuristics: &CompiledHeuristics,
    ) -> Self {
        Self::from_content_at(content, kind, context, heuristics, Utc::now())
    }
}

/// Generate an entry id: `mem_` + first 8 hex chars of the content's
/// SHA-256 + the creation instant in unix milliseconds.
pub fn generate_entry_id(content: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    let fingerprint = hex_encode(&digest[..4]);
    format!("mem_{}_{}", fingerprint, created_at.timestamp_millis())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// Tests
// ============================================================================
