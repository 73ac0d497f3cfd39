//! Test parity analysis report (`TESTING_PARITY_ANALYSIS.md`).

use crate::analysis::Analysis;
use std::fmt::Write;

pub const TITLE: &str = "Test Parity Analysis Report";
/// Section echoed to stdout after the report is written
pub const SUMMARY_HEADING: &str = "Summary Statistics";

pub fn render(analysis: &Analysis, generated_at: &str) -> String {
    let stats = analysis.statistics();
    let mut out = String::new();

    let _ = writeln!(out, "# {TITLE}");
    let _ = writeln!(out, "Generated: {generated_at}");
    let _ = writeln!(out);

    let _ = writeln!(out, "## {SUMMARY_HEADING}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | C++ (Catch2) | Swift (XCTest) |");
    let _ = writeln!(out, "|--------|---------------|----------------|");
    let _ = writeln!(
        out,
        "| Test Cases/Methods | {} TEST_CASE | {} func test |",
        stats.test_cases, stats.test_methods
    );
    let _ = writeln!(out, "| Sections | {} SECTION | N/A |", stats.sections);
    let _ = writeln!(
        out,
        "| **Functional Tests** | **{}** | **{}** |",
        stats.functional_tests, stats.test_methods
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Framework Counting Differences");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "The test count difference is due to how the testing frameworks count tests:"
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- **Catch2 (C++)**: Counts each `TEST_CASE` as one test, regardless of `SECTION`s"
    );
    let _ = writeln!(
        out,
        "- **XCTest (Swift)**: Counts each `func test()` method as a separate test"
    );
    let _ = writeln!(
        out,
        "- **Translation**: Each C++ `SECTION` is expected to become its own Swift test function"
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Detailed Test Mapping");
    let _ = writeln!(out);

    for (idx, decl) in analysis.declarations.iter().enumerate() {
        let _ = writeln!(
            out,
            "### C++ TEST_CASE: `{}` [line {}]",
            decl.name, decl.line
        );
        let _ = writeln!(out, "**Tag**: `{}`", decl.tag);
        let _ = writeln!(out);

        if decl.has_sections() {
            let _ = writeln!(out, "**Sections ({}):**", decl.sections.len());
            for (n, section) in decl.sections.iter().enumerate() {
                let _ = writeln!(out, "{}. `{}`", n + 1, section.name);
            }
        } else {
            let _ = writeln!(out, "**No sections** (single test implementation)");
        }
        let _ = writeln!(out);

        let matched: Vec<_> = analysis.matched_methods(idx).collect();
        if matched.is_empty() {
            let _ = writeln!(out, "**⚠️ No clear Swift correspondence found**");
        } else {
            let _ = writeln!(out, "**Corresponding Swift Tests ({}):**", matched.len());
            for method in matched {
                let _ = writeln!(out, "- `{}()` [line {}]", method.name, method.line);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
    }

    let unmapped: Vec<_> = analysis.unmatched_methods().collect();
    if !unmapped.is_empty() {
        let _ = writeln!(out, "## Unmapped Swift Tests");
        let _ = writeln!(out);
        let _ = writeln!(out, "These Swift tests don't have clear C++ correspondence:");
        let _ = writeln!(out);
        for method in unmapped {
            let _ = writeln!(out, "- `{}()` [line {}]", method.name, method.line);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Verification Results");
    let _ = writeln!(out);

    let expected = stats.functional_tests;
    let actual = stats.test_methods;
    if expected == actual {
        let _ = writeln!(out, "✅ **Test counts match expected pattern**");
    } else {
        let _ = writeln!(out, "⚠️ **Test count discrepancy detected**");
    }
    let _ = writeln!(out, "- Expected functional tests: {expected}");
    let _ = writeln!(out, "- Actual Swift tests: {actual}");
    if expected != actual {
        let _ = writeln!(out, "- Difference: {}", actual as i64 - expected as i64);
    }

    out
}
