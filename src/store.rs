//! Memory Store
//!
//! The bounded collection of compressed entries plus running aggregate
//! statistics and a fixed-size ring of the most recent entry ids. The store
//! exclusively owns all entries and summaries; ids are the only durable
//! handle callers keep.
//!
//! Byte totals are maintained incrementally on insert and eviction so
//! `stats()` never rescans entry bodies.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{CompiledHeuristics, MemoryConfig};
use crate::entry::{CompressContext, MemoryEntry, MemoryKind};
use crate::error::MemoryResult;
use crate::eviction::select_evictions;
use crate::summary::MemorySummary;

// ============================================================================
// MemoryStats
// ============================================================================

/// Aggregate statistics over the store's current contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Entries currently held.
    pub total_memories: usize,
    /// Compressions performed over the store's lifetime (survives eviction).
    pub compression_count: u64,
    /// `total_compressed / total_original`, 0.0 when nothing was stored.
    pub compression_ratio: f32,
    /// `(1 - compression_ratio) * 100`, 0.0 when nothing was stored.
    pub space_saved_percent: f32,
    /// Mean importance across current entries, 0.0 when empty.
    pub avg_importance: f32,
    pub total_original_bytes: usize,
    pub total_compressed_bytes: usize,
    /// Per-kind entry counts.
    pub kind_counts: HashMap<String, usize>,
    /// Stored summaries (unbounded collection, never evicted).
    pub summary_count: usize,
}

// ============================================================================
// BatchCompressItem
// ============================================================================

/// One item of a batch compression request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCompressItem {
    pub content: String,
    #[serde(default = "default_batch_kind")]
    pub kind: MemoryKind,
    #[serde(default)]
    pub context: Option<CompressContext>,
}

fn default_batch_kind() -> MemoryKind {
    MemoryKind::Generic
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Bounded in-process store of compressed memory entries.
///
/// Explicitly constructed and owned by the caller's composition root —
/// there is no global instance. Single logical owner; for shared access
/// wrap it in [`crate::service::MemoryService`].
pub struct MemoryStore {
    config: MemoryConfig,
    heuristics: Arc<CompiledHeuristics>,
    entries: HashMap<String, MemoryEntry>,
    summaries: HashMap<String, MemorySummary>,
    /// Most recent entry ids, oldest dropped silently on overflow.
    recent: VecDeque<String>,
    total_original_bytes: usize,
    total_compressed_bytes: usize,
    compression_count: u64,
}

impl MemoryStore {
    /// Create a store, compiling the configured heuristic tables.
    pub fn new(config: MemoryConfig) -> MemoryResult<Self> {
        let heuristics = Arc::new(config.heuristics.compile()?);
        Ok(Self {
            config,
            heuristics,
            entries: HashMap::new(),
            summaries: HashMap::new(),
            recent: VecDeque::new(),
            total_original_bytes: 0,
            total_compressed_bytes: 0,
            compression_count: 0,
        })
    }

    /// Create a store with the default configuration.
    pub fn with_defaults() -> MemoryResult<Self> {
        Self::new(MemoryConfig::default())
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Compress raw content and store the resulting entry.
    ///
    /// Runs the full pipeline (score, compress, extract) and commits the
    /// entry, evicting the lowest-value entries if the store exceeds its
    /// capacity. Returns the new entry's id.
    pub fn compress(
        &mut self,
        content: &str,
        kind: MemoryKind,
        context: Option<&CompressContext>,
    ) -> MemoryResult<String> {
        let entry = MemoryEntry::from_content(content, kind, context, &self.heuristics);
        Ok(self.insert(entry))
    }

    /// Commit an already-built entry.
    ///
    /// Appends the id to the recent ring, updates the running totals, and
    /// triggers eviction when the store exceeds `max_entries`.
    pub fn insert(&mut self, entry: MemoryEntry) -> String {
        let id = entry.id.clone();

        self.total_original_bytes += entry.original_text.len();
        self.total_compressed_bytes += entry.compressed_text.len();
        self.compression_count += 1;

        self.recent.push_back(id.clone());
        if self.recent.len() > self.config.recent_ring_size {
            let _ = self.recent.pop_front();
        }

        debug!(
            id = %id,
            kind = %entry.kind,
            importance = entry.importance,
            ratio = entry.compression_ratio,
            "memory entry stored"
        );

        self.entries.insert(id.clone(), entry);
        self.enforce_capacity();
        id
    }

    /// Compress a batch of items, skipping empty content, returning how
    /// many were stored. Never fails the batch.
    pub fn batch_compress(&mut self, items: Vec<BatchCompressItem>) -> usize {
        let mut stored = 0;
        for item in items {
            if item.content.is_empty() {
                warn!("skipping batch item with empty content");
                continue;
            }
            let entry = MemoryEntry::from_content(
                &item.content,
                item.kind,
                item.context.as_ref(),
                &self.heuristics,
            );
            let _ = self.insert(entry);
            stored += 1;
        }
        stored
    }

    /// Clear entries, ring, totals, the compression counter, and summaries
    /// in one atomic operation.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.summaries.clear();
        self.recent.clear();
        self.total_original_bytes = 0;
        self.total_compressed_bytes = 0;
        self.compression_count = 0;
        info!("memory store reset");
    }

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&MemoryEntry> {
        self.entries.get(id)
    }

    /// Look up a summary by id.
    pub fn get_summary(&self, id: &str) -> Option<&MemorySummary> {
        self.summaries.get(id)
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry ids, oldest first.
    pub fn recent_ids(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Iterate all current entries (order unspecified).
    pub fn entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.values()
    }

    /// Aggregate statistics over the current contents.
    pub fn stats(&self) -> MemoryStats {
        let compression_ratio = if self.total_original_bytes > 0 {
            self.total_compressed_bytes as f32 / self.total_original_bytes as f32
        } else {
            0.0
        };
        let space_saved_percent = if self.total_original_bytes > 0 {
            (1.0 - compression_ratio) * 100.0
        } else {
            0.0
        };

        let avg_importance = if self.entries.is_empty() {
            0.0
        } else {
            self.entries.values().map(|e| e.importance).sum::<f32>() / self.entries.len() as f32
        };

        let mut kind_counts: HashMap<String, usize> = HashMap::new();
        for entry in self.entries.values() {
            *kind_counts.entry(entry.kind.as_str().to_string()).or_default() += 1;
        }

        MemoryStats {
            total_memories: self.entries.len(),
            compression_count: self.compression_count,
            compression_ratio,
            space_saved_percent,
            avg_importance,
            total_original_bytes: self.total_original_bytes,
            total_compressed_bytes: self.total_compressed_bytes,
            kind_counts,
            summary_count: self.summaries.len(),
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Evict the lowest-combined entries until the store is back at capacity.
    fn enforce_capacity(&mut self) {
        if self.entries.len() <= self.config.max_entries {
            return;
        }
        let excess = self.entries.len() - self.config.max_entries;
        let now = Utc::now();
        let victims = select_evictions(&self.entries, now, excess);

        for id in &victims {
            if let Some(entry) = self.entries.remove(id) {
                self.total_original_bytes -= entry.original_text.len();
                self.total_compressed_bytes -= entry.compressed_text.len();
            }
        }

        info!(evicted = victims.len(), remaining = self.entries.len(), "capacity eviction");
    }

    /// Shared handle to the compiled heuristics (used by the service facade
    /// to run the pipeline outside the store's critical section).
    pub(crate) fn heuristics_arc(&self) -> Arc<CompiledHeuristics> {
        Arc::clone(&self.heuristics)
    }

    /// The compiled heuristic tables.
    pub fn heuristics(&self) -> &CompiledHeuristics {
        &self.heuristics
    }

    /// Store a generated summary (summaries are never evicted).
    pub(crate) fn put_summary(&mut self, summary: MemorySummary) {
        let _ = self.summaries.insert(summary.id.clone(), summary);
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.entries.len())
            .field("summaries", &self.summaries.len())
            .field("max_entries", &self.config.max_entries)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
