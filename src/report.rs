//! Plain-Text Reports
//!
//! Textual renderings of search results, statistics, and summaries for
//! callers that surface the engine's output directly (a console, a log, a
//! tool result) rather than consuming the structured values.

use crate::search::SearchHit;
use crate::store::MemoryStats;
use crate::summary::MemorySummary;

/// Render ranked search hits as a numbered list.
pub fn render_search_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No matching memories found.".to_string();
    }

    let mut out = vec![format!("Found {} matching memories:", hits.len())];
    for (i, hit) in hits.iter().enumerate() {
        out.push(format!("{}. {} [{}]", i + 1, hit.id, hit.kind));
        out.push(format!(
            "   importance: {:.2}  compression: {:.1}%  score: {:.2}",
            hit.importance,
            hit.compression_ratio * 100.0,
            hit.score
        ));
        out.push(format!("   {}", hit.preview));
        if !hit.entities.is_empty() {
            out.push(format!("   entities: {}", hit.entities.join(", ")));
        }
    }
    out.join("\n")
}

/// Render aggregate statistics.
pub fn render_stats(stats: &MemoryStats) -> String {
    let mut out = vec![
        "Memory compression statistics".to_string(),
        format!("  total memories:  {}", stats.total_memories),
        format!("  compressions:    {}", stats.compression_count),
        format!("  ratio:           {:.1}%", stats.compression_ratio * 100.0),
        format!("  space saved:     {:.1}%", stats.space_saved_percent),
        format!("  avg importance:  {:.2}", stats.avg_importance),
        format!("  original bytes:  {}", stats.total_original_bytes),
        format!("  compressed bytes: {}", stats.total_compressed_bytes),
        format!("  summaries:       {}", stats.summary_count),
    ];

    if !stats.kind_counts.is_empty() {
        out.push("  kinds:".to_string());
        let mut kinds: Vec<(&String, &usize)> = stats.kind_counts.iter().collect();
        kinds.sort();
        for (kind, count) in kinds {
            out.push(format!("    {}: {}", kind, count));
        }
    }
    out.join("\n")
}

/// Render a rollup summary.
pub fn render_summary(summary: &MemorySummary) -> String {
    let mut out = vec![
        format!("Summary {} [{}]", summary.id, summary.kind),
        format!("  memories included: {}", summary.member_ids.len()),
    ];

    if !summary.key_points.is_empty() {
        out.push(format!("  key points ({}):", summary.key_points.len()));
        for (i, point) in summary.key_points.iter().enumerate() {
            out.push(format!("    {}. {}", i + 1, point));
        }
    }
    if !summary.entities.is_empty() {
        out.push(format!("  entities: {}", summary.entities.join(", ")));
    }
    if !summary.decisions.is_empty() {
        out.push(format!("  decisions made: {}", summary.decisions.len()));
    }
    out.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
