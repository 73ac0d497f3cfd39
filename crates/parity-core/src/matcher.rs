//! Heuristic correspondence between Catch2 declarations and XCTest methods.
//!
//! Each declaration expands into a set of candidate strings (folded name,
//! folded tag, word concatenations, tag synonyms). A method corresponds to
//! the declaration when any candidate is a case-insensitive substring of the
//! method name. Matching is deliberately loose: one method can match several
//! declarations and a declaration can match none.

use crate::model::{Declaration, Method};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w]").unwrap());

/// Built-in synonyms keyed by exact tag.
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("basic", &["basic", "arithmetic", "boolean"]),
    ("variables", &["variable", "environment"]),
    ("functions", &["function", "call", "standard"]),
    ("errors", &["error", "exception", "parse"]),
    ("comparison", &["comparison", "operator"]),
    ("complex", &["complex", "expression"]),
    ("unary", &["unary", "operator"]),
    ("arithmetic", &["arithmetic", "parentheses"]),
    ("boolean_logic", &["boolean", "logic"]),
    ("mixed_types", &["mixed", "type"]),
    ("edge_cases", &["edge", "case"]),
    ("environment", &["environment", "variable"]),
    ("standard_functions", &["standard", "function", "math"]),
    ("tokens", &["token", "collection"]),
    ("strings", &["string", "literal", "concatenation"]),
];

/// Tag → extra candidate strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SynonymTable {
    /// The table shipped with parity.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_SYNONYMS
            .iter()
            .map(|(tag, words)| {
                (
                    (*tag).to_string(),
                    words.iter().map(|w| (*w).to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Replace (or add) the synonyms for each tag in `overrides`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, Vec<String>>) -> Self {
        for (tag, words) in overrides {
            self.entries.insert(tag.clone(), words.clone());
        }
        self
    }

    /// Synonyms for an exact tag, if known.
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.entries.get(tag).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Candidate strings for `decl`. Empty strings are kept out of the set.
pub fn candidate_patterns(decl: &Declaration, synonyms: &SynonymTable) -> BTreeSet<String> {
    let mut patterns = BTreeSet::new();

    patterns.insert(NON_WORD.replace_all(&decl.name, "").to_lowercase());
    patterns.insert(NON_WORD.replace_all(&decl.tag, "").to_lowercase());
    patterns.insert(decl.tag.to_lowercase());

    let lowered = decl.name.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.len() > 1 {
        patterns.insert(words.concat());
        patterns.insert(words.iter().map(|w| capitalize(w)).collect());
    }

    if let Some(extra) = synonyms.get(&decl.tag) {
        patterns.extend(extra.iter().cloned());
    }

    patterns.retain(|p| !p.is_empty());
    patterns
}

fn matches_any(method: &Method, folded_patterns: &[String]) -> bool {
    let name = method.name.to_lowercase();
    folded_patterns.iter().any(|p| name.contains(p.as_str()))
}

fn folded(patterns: &BTreeSet<String>) -> Vec<String> {
    patterns.iter().map(|p| p.to_lowercase()).collect()
}

/// Indices into `methods` that correspond to `decl`, in source order.
pub fn find_match_indices(
    decl: &Declaration,
    methods: &[Method],
    synonyms: &SynonymTable,
) -> Vec<usize> {
    let patterns = folded(&candidate_patterns(decl, synonyms));
    methods
        .iter()
        .enumerate()
        .filter(|(_, m)| matches_any(m, &patterns))
        .map(|(idx, _)| idx)
        .collect()
}

/// Methods that correspond to `decl`, in source order.
pub fn find_matches<'a>(
    decl: &Declaration,
    methods: &'a [Method],
    synonyms: &SynonymTable,
) -> Vec<&'a Method> {
    find_match_indices(decl, methods, synonyms)
        .into_iter()
        .map(|idx| &methods[idx])
        .collect()
}

/// How a declaration's match count compares with its functional test count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVerdict {
    Perfect,
    Extra { expected: usize, actual: usize },
    Missing { expected: usize, actual: usize },
}

impl ItemVerdict {
    #[must_use]
    pub fn compare(expected: usize, actual: usize) -> Self {
        match actual.cmp(&expected) {
            std::cmp::Ordering::Equal => Self::Perfect,
            std::cmp::Ordering::Greater => Self::Extra { expected, actual },
            std::cmp::Ordering::Less => Self::Missing { expected, actual },
        }
    }
}

/// Match results for every declaration against every method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTable {
    /// `per_declaration[i]` holds method indices matched by declaration `i`
    per_declaration: Vec<Vec<usize>>,
    /// Method indices matched by no declaration, in source order
    unmatched: Vec<usize>,
}

impl MatchTable {
    #[must_use]
    pub fn build(declarations: &[Declaration], methods: &[Method], synonyms: &SynonymTable) -> Self {
        let per_declaration: Vec<Vec<usize>> = declarations
            .iter()
            .map(|decl| {
                let hits = find_match_indices(decl, methods, synonyms);
                tracing::debug!(
                    test_case = %decl.name,
                    tag = %decl.tag,
                    matches = hits.len(),
                    "Matched declaration"
                );
                hits
            })
            .collect();

        let matched: BTreeSet<usize> = per_declaration.iter().flatten().copied().collect();
        let unmatched = (0..methods.len()).filter(|i| !matched.contains(i)).collect();

        Self {
            per_declaration,
            unmatched,
        }
    }

    /// Method indices matched by the declaration at `decl_index`.
    pub fn matches_for(&self, decl_index: usize) -> &[usize] {
        self.per_declaration
            .get(decl_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn unmatched(&self) -> &[usize] {
        &self.unmatched
    }

    /// Declarations with no corresponding method.
    pub fn unmatched_declaration_count(&self) -> usize {
        self.per_declaration.iter().filter(|m| m.is_empty()).count()
    }
}
