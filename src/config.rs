//! Engine Configuration
//!
//! Capacity limits and the heuristic pattern tables driving compression,
//! scoring, and entity extraction. The tables are plain configuration data
//! (pattern strings with weights/categories) so they can be tuned or
//! extended without touching the engine's control flow; they are compiled
//! once into [`CompiledHeuristics`] when a store is constructed.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, MemoryResult};

// ============================================================================
// MemoryConfig
// ============================================================================

/// Configuration for the memory engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Maximum number of entries the store holds before eviction kicks in.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Capacity of the most-recent-entry ring (oldest ids dropped silently).
    #[serde(default = "default_recent_ring_size")]
    pub recent_ring_size: usize,
    /// Heuristic pattern tables.
    #[serde(default)]
    pub heuristics: HeuristicConfig,
}

fn default_max_entries() -> usize {
    1000
}

fn default_recent_ring_size() -> usize {
    100
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            recent_ring_size: default_recent_ring_size(),
            heuristics: HeuristicConfig::default(),
        }
    }
}

impl MemoryConfig {
    /// Create a config with a specific entry capacity.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Default::default()
        }
    }
}

// ============================================================================
// Pattern table rows
// ============================================================================

/// A named structural pattern (used for code-line retention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

/// A pattern with a per-match score weight (used for code complexity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedPattern {
    pub pattern: String,
    pub weight: f32,
}

/// A pattern with a capture group and the entity category it yields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPattern {
    pub pattern: String,
    pub category: String,
}

// ============================================================================
// HeuristicConfig
// ============================================================================

/// The heuristic tables driving compression, scoring, and extraction.
///
/// Defaults cover the languages a coding session typically produces
/// (Python, Rust, JavaScript-family); callers with a narrower stack can
/// replace any table wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Structural patterns a code line must match to survive compression.
    #[serde(default = "default_structural_patterns")]
    pub structural_patterns: Vec<NamedPattern>,
    /// Per-pattern weights feeding the code-complexity score.
    #[serde(default = "default_complexity_patterns")]
    pub complexity_patterns: Vec<WeightedPattern>,
    /// Capture patterns yielding category-prefixed code entities.
    #[serde(default = "default_code_entity_patterns")]
    pub code_entity_patterns: Vec<EntityPattern>,
    /// Error vocabulary for the importance score's error-density factor.
    #[serde(default = "default_error_keywords")]
    pub error_keywords: Vec<String>,
    /// Lowercase substrings marking a diagnostic line worth keeping.
    #[serde(default = "default_error_line_markers")]
    pub error_line_markers: Vec<String>,
    /// Keywords marking a conversation segment worth keeping.
    #[serde(default = "default_importance_keywords")]
    pub importance_keywords: Vec<String>,
    /// Keywords marking an actionable solution line.
    #[serde(default = "default_action_keywords")]
    pub action_keywords: Vec<String>,
}

fn named(name: &str, pattern: &str) -> NamedPattern {
    NamedPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
    }
}

fn weighted(pattern: &str, weight: f32) -> WeightedPattern {
    WeightedPattern {
        pattern: pattern.to_string(),
        weight,
    }
}

fn entity(pattern: &str, category: &str) -> EntityPattern {
    EntityPattern {
        pattern: pattern.to_string(),
        category: category.to_string(),
    }
}

fn default_structural_patterns() -> Vec<NamedPattern> {
    vec![
        named("import", r"^(?:import|from|use)\s+\S+"),
        named("function_def", r"^(?:pub\s+)?(?:async\s+)?(?:def|fn|function)\s+\w+"),
        named("type_def", r"^(?:pub\s+)?(?:class|struct|enum|trait|interface)\s+\w+"),
        named("assignment", r"^(?:let\s+|const\s+|var\s+)?(?:mut\s+)?\w+\s*=\s*\S"),
        named("error_traceback", r#"Traceback.*Error:|File ".*".*line \d+"#),
        named("test_result", r"\b(?:PASSED|FAILED|ERROR|SKIPPED)\b"),
    ]
}

fn default_complexity_patterns() -> Vec<WeightedPattern> {
    vec![
        weighted(r"(?m)^\s*(?:pub\s+)?(?:async\s+)?(?:def|fn|function)\s+\w+", 0.10),
        weighted(r"(?m)\b(?:class|struct|enum|trait)\s+\w+", 0.15),
        weighted(r"(?m)\bif\s", 0.05),
        weighted(r"(?m)\bfor\s", 0.05),
        weighted(r"(?m)\bwhile\s", 0.05),
        weighted(r"(?m)\btry\b|\bcatch\b", 0.10),
        weighted(r"(?m)^\s*(?:import|from|use)\s+\w+", 0.02),
        weighted(r"(?:TODO|FIXME|NOTE)", 0.10),
    ]
}

fn default_code_entity_patterns() -> Vec<EntityPattern> {
    vec![
        entity(r"(?m)(?:def|fn|function)\s+(\w+)", "function"),
        entity(r"(?m)(?:class|struct|enum|trait)\s+(\w+)", "class"),
        entity(r"(?m)^\s*(?:let\s+|const\s+|var\s+)?(?:mut\s+)?(\w+)\s*=[^=]", "variable"),
        entity(r"(?m)(?:import|from|use)\s+([A-Za-z_][\w:]*)", "module"),
    ]
}

fn default_error_keywords() -> Vec<String> {
    ["error", "exception", "failed", "traceback", "bug", "fix"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_error_line_markers() -> Vec<String> {
    ["error:", "exception:", "traceback", "file \"", "line "]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_importance_keywords() -> Vec<String> {
    [
        "understand",
        "need",
        "should",
        "must",
        "important",
        "key",
        "solution",
        "problem",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_action_keywords() -> Vec<String> {
    [
        "step",
        "solution",
        "fix",
        "implement",
        "change",
        "add",
        "remove",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            structural_patterns: default_structural_patterns(),
            complexity_patterns: default_complexity_patterns(),
            code_entity_patterns: default_code_entity_patterns(),
            error_keywords: default_error_keywords(),
            error_line_markers: default_error_line_markers(),
            importance_keywords: default_importance_keywords(),
            action_keywords: default_action_keywords(),
        }
    }
}

impl HeuristicConfig {
    /// Compile the pattern tables into reusable regex sets.
    ///
    /// Fails with a `Config` error naming the offending pattern if any
    /// table row is not a valid regex.
    pub fn compile(&self) -> MemoryResult<CompiledHeuristics> {
        let structural = self
            .structural_patterns
            .iter()
            .map(|p| compile_one(&p.pattern))
            .collect::<MemoryResult<Vec<_>>>()?;

        let complexity = self
            .complexity_patterns
            .iter()
            .map(|p| Ok((compile_one(&p.pattern)?, p.weight)))
            .collect::<MemoryResult<Vec<_>>>()?;

        let code_entities = self
            .code_entity_patterns
            .iter()
            .map(|p| Ok((compile_one(&p.pattern)?, p.category.clone())))
            .collect::<MemoryResult<Vec<_>>>()?;

        Ok(CompiledHeuristics {
            structural,
            complexity,
            code_entities,
            error_token: compile_one(r"\b[A-Z][a-zA-Z]+Error\b")?,
            error_file_ref: compile_one(r#"File "([^"]+)""#)?,
            list_item: compile_one(r"^\d+\.|^[-*+]\s")?,
            quoted: compile_one(r#""([^"]+)""#)?,
            backticked: compile_one(r"`([^`]+)`")?,
            capitalized: compile_one(r"\b[A-Z][a-zA-Z]+\b")?,
            error_keywords: lowercase_all(&self.error_keywords),
            error_line_markers: lowercase_all(&self.error_line_markers),
            importance_keywords: lowercase_all(&self.importance_keywords),
            action_keywords: lowercase_all(&self.action_keywords),
        })
    }
}

fn compile_one(pattern: &str) -> MemoryResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| MemoryError::config(format!("invalid heuristic pattern '{}': {}", pattern, e)))
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

// ============================================================================
// CompiledHeuristics
// ============================================================================

/// The compiled form of [`HeuristicConfig`], built once per store.
///
/// Holds both the configurable tables and the fixed extraction regexes
/// (error tokens, file references, quoted/backticked spans) so no pattern
/// is ever recompiled on the hot path.
#[derive(Debug)]
pub struct CompiledHeuristics {
    pub(crate) structural: Vec<Regex>,
    pub(crate) complexity: Vec<(Regex, f32)>,
    pub(crate) code_entities: Vec<(Regex, String)>,
    pub(crate) error_token: Regex,
    pub(crate) error_file_ref: Regex,
    pub(crate) list_item: Regex,
    pub(crate) quoted: Regex,
    pub(crate) backticked: Regex,
    pub(crate) capitalized: Regex,
    pub(crate) error_keywords: Vec<String>,
    pub(crate) error_line_markers: Vec<String>,
    pub(crate) importance_keywords: Vec<String>,
    pub(crate) action_keywords: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================
