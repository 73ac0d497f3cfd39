//! `scripts/enhanced_test_check.sh`: a bash wrapper around the existing
//! per-language test scripts that explains the count difference in the
//! GitHub Actions step summary.
//!
//! The script is fixed text except for the four known-structure counts.

use crate::analysis::Statistics;

const HEAD: &[&str] = &[
    "#!/bin/bash",
    "# Enhanced Test Status Check with Detailed Explanation",
    "# This script provides comprehensive test reporting with count explanations",
    "",
    "set -e",
    "",
    "# Colors for output",
    r"RED='\033[0;31m'",
    r"GREEN='\033[0;32m'",
    r"YELLOW='\033[1;33m'",
    r"BLUE='\033[0;34m'",
    r"NC='\033[0m'",
    "",
    r#"echo -e "${BLUE}📊 Enhanced Test Status Check${NC}""#,
    r#"echo """#,
    "",
    "# Run existing test scripts",
    r#"echo -e "${YELLOW}Running C++ tests...${NC}""#,
    "./scripts/run_cpp_tests.sh",
    "",
    r#"echo -e "${YELLOW}Running Swift tests...${NC}""#,
    "./scripts/run_swift_tests.sh",
    "",
    "# Read test results",
    "CPP_STATUS=$(cat cpp_test_status.txt)",
    "CPP_CASES=$(cat cpp_test_cases.txt)",
    "CPP_ASSERTIONS=$(cat cpp_test_assertions.txt)",
    "",
    "SWIFT_STATUS=$(cat swift_test_status.txt)",
    "SWIFT_CASES=$(cat swift_test_cases.txt)",
    "SWIFT_FAILURES=$(cat swift_test_failures.txt)",
    "",
    "# Test count analysis",
    r#"echo """#,
    r#"echo -e "${BLUE}📋 Test Count Analysis${NC}""#,
    r#"echo """#,
    "",
    "# Known test structure (from analysis)",
];

const TAIL: &[&str] = &[
    "",
    r#"echo "Framework Reporting Differences:""#,
    r#"echo "  C++ (Catch2): $CPP_CASES test cases reported (ignores $CPP_SECTIONS sections)""#,
    r#"echo "  Swift (XCTest): $SWIFT_CASES test methods reported""#,
    r#"echo """#,
    r#"echo "Functional Test Coverage:""#,
    r#"echo "  C++ Functional Units: $CPP_FUNCTIONAL_TESTS (TEST_CASE + SECTION)""#,
    r#"echo "  Swift Test Methods: $SWIFT_TEST_METHODS""#,
    r#"echo """#,
    "",
    "# Coverage analysis",
    r#"if [ "$SWIFT_TEST_METHODS" -ge "$CPP_FUNCTIONAL_TESTS" ]; then"#,
    r#"    echo -e "✅ ${GREEN}Test Coverage: EXCELLENT${NC}""#,
    r#"    if [ "$SWIFT_TEST_METHODS" -gt "$CPP_FUNCTIONAL_TESTS" ]; then"#,
    "        EXTRA=$(($SWIFT_TEST_METHODS - $CPP_FUNCTIONAL_TESTS))",
    r#"        echo "  Swift has $EXTRA additional tests beyond C++ coverage""#,
    "    else",
    r#"        echo "  Perfect 1:1 coverage of all C++ functional tests""#,
    "    fi",
    "else",
    "    MISSING=$(($CPP_FUNCTIONAL_TESTS - $SWIFT_TEST_METHODS))",
    r#"    echo -e "⚠️ ${YELLOW}Test Coverage: $MISSING tests may be missing${NC}""#,
    "fi",
    "",
    r#"echo """#,
    "",
    "# Generate GitHub Actions summary",
    "cat >> $GITHUB_STEP_SUMMARY << 'EOF'",
    "# 🧪 Enhanced Test Status Report",
    "",
    "## Test Results",
    "| Test Suite | Status | Reported Count | Details |",
    "|------------|--------|----------------|---------|",
    r#"| **C++ (Catch2)** | **$([ "$CPP_STATUS" = "PASSED" ] && echo "✅ PASSED" || echo "❌ FAILED")** | $CPP_CASES test cases | $CPP_ASSERTIONS assertions |"#,
    r#"| **Swift (XCTest)** | **$([ "$SWIFT_STATUS" = "PASSED" ] && echo "✅ PASSED" || echo "❌ FAILED")** | $SWIFT_CASES test methods | $SWIFT_FAILURES failures |"#,
    "",
    "## Framework Counting Explanation",
    "",
    "The difference in reported test counts is **expected and normal**:",
    "",
    "- **C++ Catch2**: Reports only TEST_CASE declarations ($CPP_CASES), ignoring SECTION subdivisions",
    "- **Swift XCTest**: Reports each test function individually ($SWIFT_CASES)",
    "",
    "## Functional Test Coverage",
    "",
    "| Metric | C++ | Swift | Status |",
    "|--------|-----|-------|--------|",
    r#"| Functional Test Units | $CPP_FUNCTIONAL_TESTS | $SWIFT_TEST_METHODS | $([ "$SWIFT_TEST_METHODS" -ge "$CPP_FUNCTIONAL_TESTS" ] && echo "✅ Complete" || echo "⚠️ Incomplete") |"#,
    "| Framework Reports | $CPP_CASES | $SWIFT_CASES | Different counting methods |",
    "",
    r#"*Last updated: $(date -u "+%Y-%m-%d %H:%M:%S UTC")*"#,
    "EOF",
    "",
    r#"echo -e "${GREEN}✅ Enhanced test analysis complete!${NC}""#,
    "",
    "# Clean up",
    "rm -f cpp_test_output.txt swift_test_output.txt",
    "rm -f cpp_test_status.txt cpp_test_cases.txt cpp_test_assertions.txt",
    "rm -f swift_test_status.txt swift_test_cases.txt swift_test_failures.txt",
];

pub fn render(stats: &Statistics) -> String {
    let counts = [
        format!("CPP_TEST_CASES={}", stats.test_cases),
        format!("CPP_SECTIONS={}", stats.sections),
        format!("CPP_FUNCTIONAL_TESTS={}", stats.functional_tests),
        format!("SWIFT_TEST_METHODS={}", stats.test_methods),
    ];

    HEAD.iter()
        .copied()
        .chain(counts.iter().map(String::as_str))
        .chain(TAIL.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analysis;
    use crate::matcher::SynonymTable;

    const CPP: &str = r#"TEST_CASE("Values", "[basic]") {
    SECTION("ints") {}
    SECTION("bools") {}
}
TEST_CASE("Strings", "[strings]") {
}
"#;

    fn script() -> String {
        let analysis = Analysis::from_sources(
            CPP,
            "func testInts() {}\nfunc testBools() {}\n",
            &SynonymTable::builtin(),
        );
        render(&analysis.statistics())
    }

    #[test]
    fn starts_with_shebang_and_set_e() {
        let script = script();
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.lines().any(|l| l == "set -e"));
    }

    #[test]
    fn interpolates_known_structure() {
        let script = script();
        let lines: Vec<_> = script.lines().collect();
        let at = lines
            .iter()
            .position(|l| *l == "# Known test structure (from analysis)")
            .unwrap();
        assert_eq!(
            &lines[at + 1..at + 5],
            [
                "CPP_TEST_CASES=2",
                "CPP_SECTIONS=2",
                "CPP_FUNCTIONAL_TESTS=3",
                "SWIFT_TEST_METHODS=2",
            ]
        );
    }

    #[test]
    fn shell_escapes_survive_verbatim() {
        let script = script();
        assert!(script.contains(r"RED='\033[0;31m'"));
        assert!(script.contains(r#"echo -e "${BLUE}📊 Enhanced Test Status Check${NC}""#));
        assert!(script.contains("cat >> $GITHUB_STEP_SUMMARY << 'EOF'"));
    }

    #[test]
    fn heredoc_is_closed_and_cleanup_is_last() {
        let script = script();
        assert!(script.lines().any(|l| l == "EOF"));
        assert!(script.ends_with("swift_test_status.txt swift_test_cases.txt swift_test_failures.txt"));
    }
}
