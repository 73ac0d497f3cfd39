//! Comprehensive mapping report (`TESTING_PARITY_DETAILED.md`).
//!
//! Unlike the parity report, every TEST_CASE gets its own verdict: the
//! number of matched Swift methods is compared against the case's
//! functional test count.

use crate::analysis::{Analysis, Verdict};
use crate::matcher::ItemVerdict;
use std::fmt::Write;

pub const TITLE: &str = "Comprehensive Test Parity Analysis";
/// Section echoed to stdout after the report is written
pub const SUMMARY_HEADING: &str = "Executive Summary";

pub fn render(analysis: &Analysis, generated_at: &str) -> String {
    let stats = analysis.statistics();
    let functional = stats.functional_tests;
    let methods = stats.test_methods;
    let mut out = String::new();

    let _ = writeln!(out, "# {TITLE}");
    let _ = writeln!(out, "Generated: {generated_at}");
    let _ = writeln!(out);

    let _ = writeln!(out, "## {SUMMARY_HEADING}");
    let _ = writeln!(out);
    match stats.verdict {
        Verdict::Perfect => {
            let _ = writeln!(out, "✅ **Test parity is PERFECT**");
            let _ = writeln!(
                out,
                "Both C++ and Swift have {functional} functional tests."
            );
        }
        Verdict::Surplus { count } => {
            let _ = writeln!(out, "⚠️ **Swift has {count} EXTRA test(s)**");
            let _ = writeln!(out, "Expected: {functional}, Actual: {methods}");
        }
        Verdict::Deficit { count } => {
            let _ = writeln!(out, "❌ **Swift is MISSING {count} test(s)**");
            let _ = writeln!(out, "Expected: {functional}, Actual: {methods}");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Detailed Statistics");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Component | Count | Description |");
    let _ = writeln!(out, "|-----------|-------|-------------|");
    let _ = writeln!(
        out,
        "| C++ TEST_CASE | {} | Primary test definitions |",
        stats.test_cases
    );
    let _ = writeln!(
        out,
        "| C++ SECTION | {} | Sub-tests within TEST_CASE |",
        stats.sections
    );
    let _ = writeln!(
        out,
        "| **Total Functional Tests** | **{functional}** | **All testable units** |"
    );
    let _ = writeln!(
        out,
        "| Swift test methods | {methods} | Individual test functions |"
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Framework Behavior");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Catch2 (C++) Test Counting:**");
    let _ = writeln!(
        out,
        "- Reports {} test cases (ignores SECTIONs)",
        stats.test_cases
    );
    let _ = writeln!(
        out,
        "- Each TEST_CASE = 1 reported test, regardless of SECTIONs inside"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "**XCTest (Swift) Test Counting:**");
    let _ = writeln!(out, "- Reports {methods} test methods");
    let _ = writeln!(out, "- Each `func test()` = 1 reported test");
    let _ = writeln!(out);

    let _ = writeln!(out, "## Complete Test Mapping");
    let _ = writeln!(out);

    for (idx, decl) in analysis.declarations.iter().enumerate() {
        let _ = writeln!(out, "### {} [tag: {}]", decl.name, decl.tag);
        match decl.scope_end {
            Some(end) if end > decl.line => {
                let _ = writeln!(out, "**C++ Line:** {} (scope ends line {end})", decl.line);
            }
            _ => {
                let _ = writeln!(out, "**C++ Line:** {}", decl.line);
            }
        }

        if decl.has_sections() {
            let _ = writeln!(
                out,
                "**Structure:** TEST_CASE with {} SECTIONs",
                decl.sections.len()
            );
            let _ = writeln!(out, "**Sections:**");
            for section in &decl.sections {
                let _ = writeln!(out, "- `{}` [line {}]", section.name, section.line);
            }
        } else {
            let _ = writeln!(out, "**Structure:** Single TEST_CASE (no sections)");
        }

        let matched: Vec<_> = analysis.matched_methods(idx).collect();
        if matched.is_empty() {
            let _ = writeln!(out, "**❌ NO SWIFT MATCHES FOUND**");
        } else {
            let _ = writeln!(out, "**Swift Tests ({}):**", matched.len());
            for method in &matched {
                let _ = writeln!(out, "- `{}()` [line {}]", method.name, method.line);
            }
        }

        match ItemVerdict::compare(decl.functional_test_count(), matched.len()) {
            ItemVerdict::Perfect => {
                let _ = writeln!(out, "✅ **Perfect match**");
            }
            ItemVerdict::Extra { expected, actual } => {
                let _ = writeln!(
                    out,
                    "⚠️ **Extra Swift tests** (expected {expected}, got {actual})"
                );
            }
            ItemVerdict::Missing { expected, actual } => {
                let _ = writeln!(
                    out,
                    "❌ **Missing Swift tests** (expected {expected}, got {actual})"
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
    }

    let unmatched: Vec<_> = analysis.unmatched_methods().collect();
    if !unmatched.is_empty() {
        let _ = writeln!(out, "## Unmatched Swift Tests");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "These Swift tests don't clearly correspond to any C++ test:"
        );
        let _ = writeln!(out);
        for method in &unmatched {
            let _ = writeln!(out, "- `{}()` [line {}]", method.name, method.line);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Issues and Recommendations");
    let _ = writeln!(out);

    match stats.verdict {
        Verdict::Perfect => {
            let _ = writeln!(out, "✅ **No issues found.** Test parity is perfect.");
            let _ = writeln!(out);
            let _ = writeln!(out, "**Recommendations:**");
            let _ = writeln!(
                out,
                "- Update CI/CD reports to explain the counting difference"
            );
            let _ = writeln!(
                out,
                "- Document that Swift {methods} tests = C++ {} test cases + {} sections",
                stats.test_cases, stats.sections
            );
        }
        Verdict::Surplus { .. } | Verdict::Deficit { .. } => {
            let _ = writeln!(out, "**Critical Issues:**");
            if let Verdict::Deficit { count } = stats.verdict {
                let _ = writeln!(out, "- Swift is missing {count} tests");
                let _ = writeln!(out, "- Some C++ functionality may not be tested in Swift");
            }
            if !unmatched.is_empty() {
                let _ = writeln!(
                    out,
                    "- {} Swift tests have unclear purpose",
                    unmatched.len()
                );
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "**Recommendations:**");
            let _ = writeln!(out, "- Identify and implement missing Swift tests");
            let _ = writeln!(out, "- Review unmatched Swift tests for necessity");
            let _ = writeln!(out, "- Consider automated test synchronization");
        }
    }

    out
}
