//! Engine Integration Tests
//!
//! End-to-end tests of the compress → store → evict lifecycle: compression
//! ratio guarantees, capacity bounds, and eviction ordering.

use chrono::Utc;

use session_memory::entry::MemoryEntry;
use session_memory::eviction::combined_score;
use session_memory::{CompressContext, MemoryConfig, MemoryKind, MemoryService, MemoryStore};

// ============================================================================
// Helper Functions
// ============================================================================

fn store_with_capacity(max_entries: usize) -> MemoryStore {
    MemoryStore::new(MemoryConfig::with_max_entries(max_entries)).unwrap()
}

/// A 25-line traceback where every line carries an error marker.
fn tall_traceback() -> String {
    (0..25)
        .map(|i| format!("RuntimeError: failure at frame {}\n", i))
        .collect()
}

// ============================================================================
// Compression properties
// ============================================================================

#[test]
fn test_nonempty_input_ratio_positive_and_output_nonempty() {
    let mut store = store_with_capacity(100);
    let inputs = [
        ("a single short remark about nothing", MemoryKind::Conversation),
        ("def f(): pass", MemoryKind::Code),
        ("ValueError: boom", MemoryKind::Error),
        ("1. Fix the off-by-one", MemoryKind::Solution),
        ("plain note", MemoryKind::Generic),
        ("...", MemoryKind::Conversation),
    ];

    for (content, kind) in inputs {
        let id = store.compress(content, kind, None).unwrap();
        let entry = store.get(&id).unwrap();
        assert!(entry.compression_ratio > 0.0, "ratio for {:?}", kind);
        assert!(!entry.compressed_text.is_empty(), "output for {:?}", kind);
    }
}

#[test]
fn test_empty_input_identity() {
    let mut store = store_with_capacity(100);
    let id = store.compress("", MemoryKind::Code, None).unwrap();
    let entry = store.get(&id).unwrap();
    assert_eq!(entry.compression_ratio, 1.0);
    assert_eq!(entry.compressed_text, "");
}

#[test]
fn test_code_scenario_retains_definition_and_entity() {
    let mut store = store_with_capacity(100);
    let id = store.compress("def f(): pass", MemoryKind::Code, None).unwrap();
    let entry = store.get(&id).unwrap();

    assert!(entry.compressed_text.contains("def f(): pass"));
    assert!(entry.entities.contains(&"function:f".to_string()));
}

#[test]
fn test_error_scenario_truncates_tall_traceback() {
    let mut store = store_with_capacity(100);
    let id = store.compress(&tall_traceback(), MemoryKind::Error, None).unwrap();
    let entry = store.get(&id).unwrap();

    let lines: Vec<&str> = entry.compressed_text.lines().collect();
    assert_eq!(lines.len(), 21); // first 10 + marker + last 10
    assert!(lines[10].contains("more error lines"));
}

#[test]
fn test_unknown_kind_tag_behaves_as_generic() {
    let mut store = store_with_capacity(100);
    let kind = MemoryKind::parse("something-new");
    assert_eq!(kind, MemoryKind::Generic);

    let long = "x".repeat(800);
    let id = store.compress(&long, kind, None).unwrap();
    let entry = store.get(&id).unwrap();
    assert!(entry.compressed_text.contains("[...]"));
}

// ============================================================================
// Capacity and eviction
// ============================================================================

#[test]
fn test_store_sits_exactly_at_capacity() {
    let mut store = store_with_capacity(5);
    for i in 0..20 {
        let _ = store.compress(&format!("entry number {}", i), MemoryKind::Generic, None);
    }
    assert_eq!(store.len(), 5);
}

#[test]
fn test_eviction_scenario_lowest_importance_loses() {
    let mut store = store_with_capacity(2);
    let now = Utc::now();

    let mut ids = Vec::new();
    for (importance, seed) in [(0.9, "first"), (0.1, "second"), (0.5, "third")] {
        let mut entry =
            MemoryEntry::from_content_at(seed, MemoryKind::Generic, None, store.heuristics(), now);
        entry.importance = importance;
        ids.push(store.insert(entry));
    }

    assert_eq!(store.len(), 2);
    assert!(store.get(&ids[0]).is_some(), "0.9 survives");
    assert!(store.get(&ids[1]).is_none(), "0.1 evicted");
    assert!(store.get(&ids[2]).is_some(), "0.5 survives");
}

#[test]
fn test_survivors_dominate_evicted_by_combined_score() {
    let mut store = store_with_capacity(3);
    let now = Utc::now();

    let mut all = Vec::new();
    for i in 0..8 {
        let mut entry = MemoryEntry::from_content_at(
            &format!("entry body {}", i),
            MemoryKind::Generic,
            None,
            store.heuristics(),
            now,
        );
        entry.importance = (i as f32) * 0.1;
        all.push(entry.clone());
        let _ = store.insert(entry);
    }

    let surviving_min = all
        .iter()
        .filter(|e| store.get(&e.id).is_some())
        .map(|e| combined_score(e, now))
        .fold(f32::MAX, f32::min);
    let evicted_max = all
        .iter()
        .filter(|e| store.get(&e.id).is_none())
        .map(|e| combined_score(e, now))
        .fold(f32::MIN, f32::max);

    assert!(surviving_min >= evicted_max);
}

// ============================================================================
// Service facade
// ============================================================================

#[test]
fn test_service_full_lifecycle() {
    let service = MemoryService::new(MemoryConfig::with_max_entries(50)).unwrap();

    let context = CompressContext::with_relevance(0.9);
    let id = service
        .compress(
            "We must fix the flaky retry loop before shipping.",
            MemoryKind::Conversation,
            Some(&context),
        )
        .unwrap();

    let entry = service.get(&id).unwrap().unwrap();
    assert!(entry.importance > 0.0);

    let stats = service.stats().unwrap();
    assert_eq!(stats.total_memories, 1);
    assert_eq!(stats.compression_count, 1);

    service.reset().unwrap();
    assert!(service.get(&id).unwrap().is_none());
    assert_eq!(service.stats().unwrap().total_memories, 0);
}
