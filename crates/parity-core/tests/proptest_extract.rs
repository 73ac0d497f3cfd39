//! Property-based tests for inventory extraction.
//!
//! Covers the functional count law, source-order preservation, idempotence,
//! and the split between parsed declarations and raw marker lines.

use proptest::prelude::*;

use parity_core::extract::{extract_declarations, extract_methods};
use parity_core::model::{MarkerCounts, total_functional_tests, total_sections};

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
struct CaseSpec {
    name: String,
    tag: String,
    sections: Vec<String>,
}

fn arb_case() -> impl Strategy<Value = CaseSpec> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,20}",
        "[a-z][a-z_]{0,12}",
        prop::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,16}", 0..5),
    )
        .prop_map(|(name, tag, sections)| CaseSpec {
            name,
            tag,
            sections,
        })
}

fn render_cpp(cases: &[CaseSpec]) -> String {
    let mut out = String::from("#include <catch2/catch.hpp>\n\n");
    for case in cases {
        out.push_str(&format!("TEST_CASE(\"{}\", \"[{}]\") {{\n", case.name, case.tag));
        if case.sections.is_empty() {
            out.push_str("    REQUIRE(true);\n");
        }
        for section in &case.sections {
            out.push_str(&format!("    SECTION(\"{section}\") {{\n"));
            out.push_str("        REQUIRE(1 + 1 == 2);\n");
            out.push_str("    }\n");
        }
        out.push_str("}\n\n");
    }
    out
}

fn render_swift(suffixes: &[String]) -> String {
    let mut out = String::from("import XCTest\n\nfinal class ExpressionKitTests: XCTestCase {\n");
    for (i, suffix) in suffixes.iter().enumerate() {
        out.push_str(&format!("    func test{suffix}() {{\n        XCTAssertTrue(true)\n    }}\n"));
        out.push_str(&format!("    func helper{i}(value: Int) {{}}\n"));
    }
    out.push_str("}\n");
    out
}

// =============================================================================
// Declarations
// =============================================================================

proptest! {
    #[test]
    fn functional_total_is_sum_of_max_one_sections(cases in prop::collection::vec(arb_case(), 0..8)) {
        let decls = extract_declarations(&render_cpp(&cases));
        let expected: usize = cases.iter().map(|c| c.sections.len().max(1)).sum();
        prop_assert_eq!(total_functional_tests(&decls), expected);
        prop_assert_eq!(total_sections(&decls), cases.iter().map(|c| c.sections.len()).sum::<usize>());
        for decl in &decls {
            prop_assert!(decl.functional_test_count() >= 1);
        }
    }

    #[test]
    fn declarations_preserve_source_order(cases in prop::collection::vec(arb_case(), 0..8)) {
        let decls = extract_declarations(&render_cpp(&cases));
        prop_assert_eq!(decls.len(), cases.len());
        for (decl, case) in decls.iter().zip(&cases) {
            prop_assert_eq!(&decl.name, &case.name);
            prop_assert_eq!(&decl.tag, &case.tag);
            let names: Vec<&str> = decl.sections.iter().map(|s| s.name.as_str()).collect();
            let expected: Vec<&str> = case.sections.iter().map(String::as_str).collect();
            prop_assert_eq!(names, expected);
        }
        for pair in decls.windows(2) {
            prop_assert!(pair[0].line < pair[1].line);
        }
    }

    #[test]
    fn sections_lie_inside_their_scope(cases in prop::collection::vec(arb_case(), 1..6)) {
        let decls = extract_declarations(&render_cpp(&cases));
        for decl in &decls {
            let end = decl.scope_end.expect("balanced case should record a scope end");
            prop_assert!(end > decl.line);
            for section in &decl.sections {
                prop_assert!(section.line > decl.line && section.line < end);
            }
        }
    }

    #[test]
    fn declaration_extraction_is_idempotent(cases in prop::collection::vec(arb_case(), 0..8)) {
        let source = render_cpp(&cases);
        prop_assert_eq!(extract_declarations(&source), extract_declarations(&source));
    }

    #[test]
    fn parsed_cases_never_exceed_marker_lines(
        cases in prop::collection::vec(arb_case(), 0..6),
        commented in 0usize..4,
    ) {
        let mut source = render_cpp(&cases);
        for i in 0..commented {
            source.push_str(&format!("// TEST_CASE(\"Disabled {i}\", \"[off]\")\n"));
        }
        let decls = extract_declarations(&source);
        let markers = MarkerCounts::scan(&source, "");
        prop_assert_eq!(decls.len(), cases.len());
        prop_assert_eq!(markers.test_case_lines, cases.len() + commented);
    }
}

// =============================================================================
// Methods
// =============================================================================

proptest! {
    #[test]
    fn methods_preserve_source_order(suffixes in prop::collection::vec("[A-Za-z0-9_]{1,16}", 0..12)) {
        let methods = extract_methods(&render_swift(&suffixes));
        let names: Vec<String> = methods.iter().map(|m| m.name.clone()).collect();
        let expected: Vec<String> = suffixes.iter().map(|s| format!("test{s}")).collect();
        prop_assert_eq!(names, expected);
        for pair in methods.windows(2) {
            prop_assert!(pair[0].line < pair[1].line);
        }
    }

    #[test]
    fn method_extraction_is_idempotent(suffixes in prop::collection::vec("[A-Za-z0-9_]{1,16}", 0..12)) {
        let source = render_swift(&suffixes);
        prop_assert_eq!(extract_methods(&source), extract_methods(&source));
    }

    #[test]
    fn arbitrary_text_never_panics(source in ".{0,400}") {
        let _ = extract_declarations(&source);
        let _ = extract_methods(&source);
    }
}
