//! Inventory types extracted from the two test suites.

use serde::Serialize;

/// One `SECTION("...")` inside a Catch2 `TEST_CASE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubDeclaration {
    pub name: String,
    /// 1-based source line
    pub line: usize,
}

/// One Catch2 `TEST_CASE("name", "[tag]")` and the sections it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub tag: String,
    /// 1-based source line of the `TEST_CASE` itself
    pub line: usize,
    pub sections: Vec<SubDeclaration>,
    /// Line where brace balance first returned to zero after the declaration
    /// opened. Informational; never used to close the declaration.
    pub scope_end: Option<usize>,
}

impl Declaration {
    #[must_use]
    pub fn new(name: impl Into<String>, tag: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            line,
            sections: Vec::new(),
            scope_end: None,
        }
    }

    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Independently executable units this declaration represents: the
    /// section count, or 1 when there are no sections.
    pub fn functional_test_count(&self) -> usize {
        self.sections.len().max(1)
    }
}

/// One XCTest `func testXxx()` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    /// 1-based source line
    pub line: usize,
}

impl Method {
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// Sum of [`Declaration::functional_test_count`] over an inventory.
pub fn total_functional_tests(declarations: &[Declaration]) -> usize {
    declarations
        .iter()
        .map(Declaration::functional_test_count)
        .sum()
}

/// Sum of section counts over an inventory.
pub fn total_sections(declarations: &[Declaration]) -> usize {
    declarations.iter().map(|d| d.sections.len()).sum()
}

/// Raw per-line marker counts, i.e. what each framework's own reporter sees.
///
/// These are plain substring counts: commented-out or otherwise unparsable
/// declarations are still counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkerCounts {
    /// Lines containing `TEST_CASE(`
    pub test_case_lines: usize,
    /// Lines containing `SECTION(`
    pub section_lines: usize,
    /// Lines containing `func test`
    pub test_method_lines: usize,
}

impl MarkerCounts {
    #[must_use]
    pub fn scan(cpp_source: &str, swift_source: &str) -> Self {
        let count = |text: &str, needle: &str| text.lines().filter(|l| l.contains(needle)).count();
        Self {
            test_case_lines: count(cpp_source, "TEST_CASE("),
            section_lines: count(cpp_source, "SECTION("),
            test_method_lines: count(swift_source, "func test"),
        }
    }
}
