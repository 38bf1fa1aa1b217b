//! Memory Service Facade
//!
//! A lock-guarded wrapper exposing the engine's public operations to
//! multiple callers. The store is a single critical section: insert,
//! eviction, and stats reads are mutually exclusive, so a reader never
//! observes a store mid-eviction with inconsistent totals.
//!
//! Compression, scoring, and extraction are CPU-bound text scans with no
//! dependency on store state, so the facade runs the whole pipeline on the
//! caller's thread first and takes the lock only to commit the finished
//! entry.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::config::{CompiledHeuristics, MemoryConfig};
use crate::entry::{CompressContext, MemoryEntry, MemoryKind};
use crate::error::{MemoryError, MemoryResult};
use crate::search::{search_memories, SearchHit, SearchRequest};
use crate::store::{BatchCompressItem, MemoryStats, MemoryStore};
use crate::summary::{generate_summary, MemorySummary, SummaryKind};

/// Shared, lock-guarded memory engine.
pub struct MemoryService {
    heuristics: Arc<CompiledHeuristics>,
    store: Mutex<MemoryStore>,
}

impl MemoryService {
    /// Create a service owning a freshly constructed store.
    pub fn new(config: MemoryConfig) -> MemoryResult<Self> {
        let store = MemoryStore::new(config)?;
        let heuristics = store.heuristics_arc();
        Ok(Self {
            heuristics,
            store: Mutex::new(store),
        })
    }

    /// Create a service with the default configuration.
    pub fn with_defaults() -> MemoryResult<Self> {
        Self::new(MemoryConfig::default())
    }

    /// Compress raw content into a stored entry, returning its id.
    ///
    /// The pipeline runs outside the lock; only the commit is serialized.
    pub fn compress(
        &self,
        content: &str,
        kind: MemoryKind,
        context: Option<&CompressContext>,
    ) -> MemoryResult<String> {
        let entry = MemoryEntry::from_content(content, kind, context, &self.heuristics);
        Ok(self.lock()?.insert(entry))
    }

    /// Compress a batch of items, skipping empty content. All pipelines run
    /// outside the lock; the commits share one critical section so the
    /// batch lands contiguously in the recent ring.
    pub fn batch_compress(&self, items: Vec<BatchCompressItem>) -> MemoryResult<usize> {
        let mut built = Vec::with_capacity(items.len());
        for item in items {
            if item.content.is_empty() {
                warn!("skipping batch item with empty content");
                continue;
            }
            built.push(MemoryEntry::from_content(
                &item.content,
                item.kind,
                item.context.as_ref(),
                &self.heuristics,
            ));
        }

        let mut store = self.lock()?;
        let stored = built.len();
        for entry in built {
            let _ = store.insert(entry);
        }
        Ok(stored)
    }

    /// Look up an entry by id (cloned out of the critical section).
    pub fn get(&self, id: &str) -> MemoryResult<Option<MemoryEntry>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Ranked substring search over the store.
    pub fn search(&self, request: &SearchRequest) -> MemoryResult<Vec<SearchHit>> {
        Ok(search_memories(&*self.lock()?, request))
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> MemoryResult<MemoryStats> {
        Ok(self.lock()?.stats())
    }

    /// Summarize the given ids (or the recent ring), returning the stored
    /// summary, or `None` when nothing resolved.
    pub fn summarize(
        &self,
        kind: SummaryKind,
        ids: Option<Vec<String>>,
    ) -> MemoryResult<Option<MemorySummary>> {
        let mut store = self.lock()?;
        let Some(id) = generate_summary(&mut store, kind, ids) else {
            return Ok(None);
        };
        Ok(store.get_summary(&id).cloned())
    }

    /// Look up a previously generated summary by id.
    pub fn get_summary(&self, id: &str) -> MemoryResult<Option<MemorySummary>> {
        Ok(self.lock()?.get_summary(id).cloned())
    }

    /// Atomically clear entries, ring, totals, and summaries.
    pub fn reset(&self) -> MemoryResult<()> {
        self.lock()?.reset();
        Ok(())
    }

    fn lock(&self) -> MemoryResult<MutexGuard<'_, MemoryStore>> {
        self.store
            .lock()
            .map_err(|_| MemoryError::unavailable("memory store lock poisoned"))
    }
}

impl std::fmt::Debug for MemoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryService").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
