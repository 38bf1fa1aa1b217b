//! Search Integration Tests
//!
//! Ranked retrieval over a populated store: kind filters, ordering,
//! exclusion of unmatched entries, and hit summaries.

use session_memory::{
    search_memories, MemoryConfig, MemoryKind, MemoryService, MemoryStore, SearchRequest,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn populated_store() -> MemoryStore {
    let mut store = MemoryStore::new(MemoryConfig::default()).unwrap();
    let _ = store.compress(
        "We need to understand why the database migration keeps failing.",
        MemoryKind::Conversation,
        None,
    );
    let _ = store.compress(
        "def migrate(schema):\n    apply(schema)\n",
        MemoryKind::Code,
        None,
    );
    let _ = store.compress(
        "Traceback (most recent call last):\n  File \"migrate.py\", line 4\nOperationalError: database is locked\n",
        MemoryKind::Error,
        None,
    );
    let _ = store.compress(
        "1. Add an index on the session table\n2. Fix the migration ordering\n",
        MemoryKind::Solution,
        None,
    );
    store
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_query_matches_across_kinds() {
    let store = populated_store();
    let hits = search_memories(&store, &SearchRequest::new("migration"));
    // Conversation and solution mention "migration"; the code and error
    // entries contain only "migrate".
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_unmatched_query_returns_empty() {
    let store = populated_store();
    let hits = search_memories(&store, &SearchRequest::new("zzz-no-such-token"));
    assert!(hits.is_empty());
}

#[test]
fn test_kind_filter_narrows_results() {
    let store = populated_store();
    let hits = search_memories(
        &store,
        &SearchRequest::new("database").with_kind(MemoryKind::Error),
    );
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, MemoryKind::Error);
}

#[test]
fn test_entity_match_surfaces_entry() {
    let store = populated_store();
    // "OperationalError" appears in the error entry's entities.
    let hits = search_memories(&store, &SearchRequest::new("operationalerror"));
    assert!(!hits.is_empty());
    assert!(hits[0].entities.iter().any(|e| e.contains("OperationalError")));
}

#[test]
fn test_results_sorted_and_bounded() {
    let mut store = MemoryStore::new(MemoryConfig::default()).unwrap();
    for i in 0..12 {
        let _ = store.compress(
            &format!("shared phrase occurrence number {}", i),
            MemoryKind::Generic,
            None,
        );
    }

    let hits = search_memories(&store, &SearchRequest::new("shared phrase").with_limit(4));
    assert_eq!(hits.len(), 4);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_service_search_renders_report() {
    let service = MemoryService::with_defaults().unwrap();
    let _ = service
        .compress("the connection pool exhausts under load", MemoryKind::Conversation, None)
        .unwrap();

    let hits = service.search(&SearchRequest::new("connection pool")).unwrap();
    let rendered = session_memory::report::render_search_results(&hits);
    assert!(rendered.contains("Found 1 matching memories:"));
    assert!(rendered.contains("connection pool"));

    let empty = service.search(&SearchRequest::new("nothing-here")).unwrap();
    assert_eq!(
        session_memory::report::render_search_results(&empty),
        "No matching memories found."
    );
}
