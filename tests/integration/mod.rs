//! Integration Tests Module
//!
//! Cross-module tests exercising the memory engine end to end: the
//! compress-store-evict lifecycle, ranked retrieval, and rollup
//! summarization through both the owned store and the shared service
//! facade.

// Compress pipeline + store lifecycle + eviction tests
mod engine_test;

// Ranked search tests
mod search_test;

// Summarization and reporting tests
mod summary_test;
