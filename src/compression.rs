//! Compression Strategies
//!
//! Type-dispatched transforms reducing raw text to a denser representative
//! form. Each strategy keeps the substrings most likely needed for later
//! recall — structure for code, diagnostic anchors for errors, actionable
//! steps for solutions — while bounding worst-case output size for the
//! error and generic paths.
//!
//! All strategies are total: empty input passes through unchanged, and any
//! strategy that would otherwise produce an empty result for non-empty
//! input falls back to generic truncation so the "compressed text is
//! non-empty whenever the original is" invariant holds.

use crate::config::CompiledHeuristics;
use crate::entry::MemoryKind;

/// Marker spliced in wherever content was elided.
pub const ELLIPSIS_MARKER: &str = "[...]";

/// Minimum length for a conversation segment to be considered substantial.
const MIN_SEGMENT_LEN: usize = 10;
/// Segment count above which a conversation is spliced to head + kept + tail.
const SEGMENT_SPLICE_THRESHOLD: usize = 10;
/// Error-line count above which the diagnostic list is spliced.
const MAX_ERROR_LINES: usize = 20;
/// Head/tail slice kept when splicing an over-long diagnostic list.
const ERROR_EDGE_LINES: usize = 10;
/// Character budget for each half of the raw-error fallback.
const ERROR_FALLBACK_EDGE: usize = 500;
/// Generic truncation threshold in characters.
const GENERIC_MAX_CHARS: usize = 500;
/// Characters kept on each side by generic truncation.
const GENERIC_EDGE_CHARS: usize = 250;

/// Compress raw content according to its kind.
pub fn compress_text(text: &str, kind: MemoryKind, heuristics: &CompiledHeuristics) -> String {
    let compressed = match kind {
        MemoryKind::Conversation => compress_conversation(text, heuristics),
        MemoryKind::Code => compress_code(text, heuristics),
        MemoryKind::Error => compress_error(text, heuristics),
        MemoryKind::Solution => compress_solution(text, heuristics),
        MemoryKind::Context | MemoryKind::Generic => compress_generic(text),
    };

    if compressed.is_empty() && !text.is_empty() {
        return compress_generic(text);
    }
    compressed
}

/// Conversation: keep substantial segments containing an importance keyword,
/// splicing in the first and last three segments for context when the
/// conversation is long.
fn compress_conversation(text: &str, heuristics: &CompiledHeuristics) -> String {
    let segments: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| {
            segment.len() > MIN_SEGMENT_LEN && {
                let lower = segment.to_lowercase();
                heuristics
                    .importance_keywords
                    .iter()
                    .any(|kw| lower.contains(kw.as_str()))
            }
        })
        .collect();

    let output: Vec<&str> = if segments.len() > SEGMENT_SPLICE_THRESHOLD {
        let mut spliced = Vec::with_capacity(kept.len() + 8);
        spliced.extend_from_slice(&segments[..3]);
        spliced.push(ELLIPSIS_MARKER);
        spliced.extend_from_slice(&kept);
        spliced.push(ELLIPSIS_MARKER);
        spliced.extend_from_slice(&segments[segments.len() - 3..]);
        spliced
    } else {
        segments
    };

    output.join(". ")
}

/// Code: drop blanks and full-line comments, keep only structurally
/// significant lines, and annotate the reduction when more than half of the
/// original lines were dropped.
fn compress_code(code: &str, heuristics: &CompiledHeuristics) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let mut kept: Vec<&str> = Vec::new();
    for line in &lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if heuristics.structural.iter().any(|re| re.is_match(trimmed)) {
            kept.push(trimmed);
        }
    }

    if lines.len() > kept.len() * 2 {
        let annotation = format!("[code compressed: {} -> {} lines]", lines.len(), kept.len());
        let mut out = vec![annotation];
        out.extend(kept.iter().map(|s| s.to_string()));
        return out.join("\n");
    }

    kept.join("\n")
}

/// Error: keep diagnostic lines (marker substrings or `SomethingError`
/// tokens), splicing to first/last 10 past 20 kept lines. When nothing
/// qualifies, fall back to the raw text's head and tail.
fn compress_error(text: &str, heuristics: &CompiledHeuristics) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        let marked = heuristics
            .error_line_markers
            .iter()
            .any(|m| lower.contains(m.as_str()));
        if marked || heuristics.error_token.is_match(trimmed) {
            kept.push(trimmed);
        }
    }

    if kept.is_empty() {
        // No recognizable diagnostics: bound the raw text instead.
        if char_count(text) > ERROR_FALLBACK_EDGE * 2 {
            return join_head_tail(text, ERROR_FALLBACK_EDGE);
        }
        return text.to_string();
    }

    if kept.len() > MAX_ERROR_LINES {
        let omitted = kept.len() - ERROR_EDGE_LINES * 2;
        let mut out: Vec<String> = kept[..ERROR_EDGE_LINES]
            .iter()
            .map(|s| s.to_string())
            .collect();
        out.push(format!("[... {} more error lines ...]", omitted));
        out.extend(kept[kept.len() - ERROR_EDGE_LINES..].iter().map(|s| s.to_string()));
        return out.join("\n");
    }

    kept.join("\n")
}

/// Solution: keep list items and action-keyword lines; when fewer than half
/// the lines survive, frame them with the opening and closing two lines.
fn compress_solution(text: &str, heuristics: &CompiledHeuristics) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            if heuristics.list_item.is_match(line) {
                return true;
            }
            let lower = line.to_lowercase();
            heuristics
                .action_keywords
                .iter()
                .any(|kw| lower.contains(kw.as_str()))
        })
        .collect();

    if lines.len() > kept.len() * 2 {
        let head = &lines[..lines.len().min(2)];
        let tail_start = lines.len().saturating_sub(2);
        let tail = &lines[tail_start..];

        let mut out: Vec<&str> = Vec::with_capacity(kept.len() + 4);
        out.extend_from_slice(head);
        out.extend_from_slice(&kept);
        out.extend_from_slice(tail);
        return out.join("\n");
    }

    kept.join("\n")
}

/// Generic: head + marker + tail truncation past 500 characters, otherwise
/// the text unchanged.
fn compress_generic(text: &str) -> String {
    if char_count(text) > GENERIC_MAX_CHARS {
        return join_head_tail(text, GENERIC_EDGE_CHARS);
    }
    text.to_string()
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// First and last `edge` characters joined by the ellipsis marker.
/// Char-based so multi-byte content never splits mid-codepoint.
fn join_head_tail(text: &str, edge: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let head: String = chars[..edge].iter().collect();
    let tail: String = chars[chars.len() - edge..].iter().collect();
    format!("{}\n{}\n{}", head, ELLIPSIS_MARKER, tail)
}

// ============================================================================
// Tests
// ============================================================================
