//! Summarization Integration Tests
//!
//! Rollups over the recent ring and explicit id sets, eviction interplay,
//! and the plain-text summary report.

use session_memory::report::render_summary;
use session_memory::summary::MAX_KEY_POINTS;
use session_memory::{
    generate_summary, MemoryConfig, MemoryKind, MemoryService, MemoryStore, SummaryKind,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn create_store() -> MemoryStore {
    MemoryStore::new(MemoryConfig::default()).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_summary_uses_recent_ring_by_default() {
    let mut store = create_store();
    let first = store
        .compress(
            "The important part is keeping the cache warm between runs.",
            MemoryKind::Conversation,
            None,
        )
        .unwrap();
    let second = store
        .compress(
            "We should precompute the index on startup instead.",
            MemoryKind::Conversation,
            None,
        )
        .unwrap();

    let id = generate_summary(&mut store, SummaryKind::Session, None).unwrap();
    let summary = store.get_summary(&id).unwrap();

    assert_eq!(summary.member_ids, vec![first, second]);
    assert_eq!(summary.kind, SummaryKind::Session);
}

#[test]
fn test_summary_skips_evicted_members() {
    let mut store = MemoryStore::new(MemoryConfig::with_max_entries(2)).unwrap();
    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(
            store
                .compress(
                    &format!("A reasonably long observation number {} here.", i),
                    MemoryKind::Conversation,
                    None,
                )
                .unwrap(),
        );
    }

    // One of the three was evicted; the summary silently drops it.
    let id = generate_summary(&mut store, SummaryKind::Session, Some(ids.clone())).unwrap();
    let summary = store.get_summary(&id).unwrap();
    assert_eq!(summary.member_ids.len(), 2);
    assert!(summary.member_ids.iter().all(|m| store.get(m).is_some()));
}

#[test]
fn test_summary_caps_hold() {
    let mut store = create_store();
    for i in 0..6 {
        let text: String = (0..4)
            .map(|j| format!("Observation {} item {} long enough to count as a key point\n", i, j))
            .collect();
        let _ = store.compress(&text, MemoryKind::Generic, None).unwrap();
    }

    let id = generate_summary(&mut store, SummaryKind::Project, None).unwrap();
    let summary = store.get_summary(&id).unwrap();
    assert_eq!(summary.key_points.len(), MAX_KEY_POINTS);
    assert!(summary.entities.len() <= 15);
}

#[test]
fn test_summary_collects_solution_decisions() {
    let service = MemoryService::with_defaults().unwrap();
    let _ = service
        .compress(
            "1. Reproduce the hang with a single worker thread\n\
             2. Fix the deadlock by ordering the lock acquisition\n\
             3. Add a watchdog covering the worker pool\n",
            MemoryKind::Solution,
            None,
        )
        .unwrap();

    let summary = service.summarize(SummaryKind::Task, None).unwrap().unwrap();
    assert_eq!(summary.decisions.len(), 3);
    assert!(summary.decisions.iter().all(|d| d.starts_with("solution:")));
}

#[test]
fn test_summary_empty_store_yields_none() {
    let service = MemoryService::with_defaults().unwrap();
    assert!(service.summarize(SummaryKind::Session, None).unwrap().is_none());
}

#[test]
fn test_summary_report_rendering() {
    let mut store = create_store();
    let _ = store.compress(
        "Key decision: the parser must reject unterminated blocks early.",
        MemoryKind::Conversation,
        None,
    );

    let id = generate_summary(&mut store, SummaryKind::Session, None).unwrap();
    let rendered = render_summary(store.get_summary(&id).unwrap());

    assert!(rendered.contains(&id));
    assert!(rendered.contains("[session]"));
    assert!(rendered.contains("memories included: 1"));
}

#[test]
fn test_summaries_survive_eviction_pressure() {
    let mut store = MemoryStore::new(MemoryConfig::with_max_entries(3)).unwrap();
    for i in 0..3 {
        let _ = store.compress(
            &format!("Initial observation number {} with enough length.", i),
            MemoryKind::Conversation,
            None,
        );
    }
    let summary_id = generate_summary(&mut store, SummaryKind::Session, None).unwrap();

    // Push higher-importance entries until every original member is evicted.
    for i in 0..10 {
        let _ = store.compress(
            &format!("Follow-up {}: error exception failed traceback bug fix", i),
            MemoryKind::Generic,
            None,
        );
    }

    // The members are gone but the summary itself is never evicted.
    let summary = store.get_summary(&summary_id).unwrap();
    assert_eq!(summary.member_ids.len(), 3);
    assert!(summary.member_ids.iter().all(|m| store.get(m).is_none()));
    assert_eq!(store.stats().summary_count, 1);
}
