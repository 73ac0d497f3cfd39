//! Line-oriented extraction of the Catch2 and XCTest inventories.
//!
//! Each line is trimmed before matching, and every pattern is anchored at
//! the start of the trimmed line, so indented declarations are found while
//! declarations that follow other code on the same line are not.
//!
//! A `TEST_CASE` stays open until the next `TEST_CASE` or end of input.
//! Brace balance is tracked only to record where the case's scope textually
//! ends; it never closes the declaration, so sections that follow a
//! mid-case brace imbalance are still attributed to the right case.

use crate::error::InputError;
use crate::model::{Declaration, Method, SubDeclaration};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TEST_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^TEST_CASE\("([^"]+)",\s*"\[([^\]]+)\]"\)"#).unwrap());
static SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^SECTION\("([^"]+)"\)"#).unwrap());
static TEST_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^func\s+(test\w+)\(\)").unwrap());

/// Brace-depth bookkeeping for the currently open declaration.
#[derive(Debug, Default)]
struct ScopeTracker {
    depth: i64,
    /// Depth before the open declaration's `TEST_CASE` line
    open_depth: i64,
    entered: bool,
}

impl ScopeTracker {
    fn open(&mut self) {
        self.open_depth = self.depth;
        self.entered = false;
    }

    /// Apply one line's braces; returns true when the open scope just closed.
    fn advance(&mut self, line: &str) -> bool {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        self.depth += opens - closes;
        if opens > 0 {
            self.entered = true;
        }
        self.entered && self.depth <= self.open_depth
    }
}

/// Extract `TEST_CASE` declarations and their `SECTION`s, in source order.
pub fn extract_declarations(source: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut current: Option<Declaration> = None;
    let mut scope = ScopeTracker::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();

        if let Some(caps) = TEST_CASE.captures(line) {
            if let Some(done) = current.take() {
                declarations.push(done);
            }
            scope.open();
            current = Some(Declaration::new(&caps[1], &caps[2], line_number));
        } else if let Some(caps) = SECTION.captures(line) {
            if let Some(decl) = current.as_mut() {
                decl.sections.push(SubDeclaration {
                    name: caps[1].to_string(),
                    line: line_number,
                });
            }
        }

        let closed = scope.advance(line);
        if let Some(decl) = current.as_mut() {
            if closed && decl.scope_end.is_none() {
                decl.scope_end = Some(line_number);
            }
        }
    }

    if let Some(done) = current {
        declarations.push(done);
    }

    declarations
}

/// Extract `func testXxx()` methods, in source order.
pub fn extract_methods(source: &str) -> Vec<Method> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            TEST_METHOD
                .captures(raw.trim())
                .map(|caps| Method::new(&caps[1], idx + 1))
        })
        .collect()
}

/// A source file's text together with the inventory extracted from it.
///
/// The text is kept for the raw marker counts.
#[derive(Debug, Clone)]
pub struct Extracted<T> {
    pub source: String,
    pub items: Vec<T>,
}

/// Read a test source completely. Missing, unreadable and non-UTF-8 files
/// are all fatal.
fn read_source(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::from_io(path, &e))
}

/// Read and extract the Catch2 inventory from `path`.
pub fn declarations_from_file(path: &Path) -> Result<Extracted<Declaration>, InputError> {
    let source = read_source(path)?;
    let items = extract_declarations(&source);
    tracing::debug!(
        path = %path.display(),
        test_cases = items.len(),
        sections = crate::model::total_sections(&items),
        "Extracted Catch2 inventory"
    );
    Ok(Extracted { source, items })
}

/// Read and extract the XCTest inventory from `path`.
pub fn methods_from_file(path: &Path) -> Result<Extracted<Method>, InputError> {
    let source = read_source(path)?;
    let items = extract_methods(&source);
    tracing::debug!(path = %path.display(), methods = items.len(), "Extracted XCTest inventory");
    Ok(Extracted { source, items })
}
