//! One-shot analysis pipeline: read both sources, extract, match.

use crate::extract::{declarations_from_file, extract_declarations, extract_methods, methods_from_file};
use crate::matcher::{MatchTable, SynonymTable};
use crate::model::{self, Declaration, MarkerCounts, Method};
use serde::Serialize;
use std::path::Path;

pub const CPP_FRAMEWORK: &str = "Catch2";
pub const SWIFT_FRAMEWORK: &str = "XCTest";

/// Aggregate comparison of functional tests against XCTest methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Same number of functional tests and methods
    Perfect,
    /// More methods than functional tests
    Surplus { count: usize },
    /// Fewer methods than functional tests
    Deficit { count: usize },
}

impl Verdict {
    #[must_use]
    pub fn compare(functional_tests: usize, methods: usize) -> Self {
        match methods.cmp(&functional_tests) {
            std::cmp::Ordering::Equal => Self::Perfect,
            std::cmp::Ordering::Greater => Self::Surplus {
                count: methods - functional_tests,
            },
            std::cmp::Ordering::Less => Self::Deficit {
                count: functional_tests - methods,
            },
        }
    }
}

/// Counts shared by every report variant; also the `--json` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub cpp_framework: &'static str,
    pub swift_framework: &'static str,
    pub test_cases: usize,
    pub sections: usize,
    pub functional_tests: usize,
    pub test_methods: usize,
    /// What Catch2 itself reports (one per `TEST_CASE(` line)
    pub cpp_reported: usize,
    /// What XCTest itself reports (one per `func test` line)
    pub swift_reported: usize,
    pub unmatched_methods: usize,
    pub unmatched_declarations: usize,
    pub verdict: Verdict,
}

/// Both inventories plus their match table.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub declarations: Vec<Declaration>,
    pub methods: Vec<Method>,
    pub matches: MatchTable,
    pub markers: MarkerCounts,
}

impl Analysis {
    /// Analyze two in-memory sources.
    #[must_use]
    pub fn from_sources(cpp_source: &str, swift_source: &str, synonyms: &SynonymTable) -> Self {
        Self::assemble(
            extract_declarations(cpp_source),
            extract_methods(swift_source),
            MarkerCounts::scan(cpp_source, swift_source),
            synonyms,
        )
    }

    /// Read both files and analyze them. Any read failure aborts the run.
    pub fn load(cpp_path: &Path, swift_path: &Path, synonyms: &SynonymTable) -> crate::Result<Self> {
        let cpp = declarations_from_file(cpp_path)?;
        let swift = methods_from_file(swift_path)?;
        let markers = MarkerCounts::scan(&cpp.source, &swift.source);
        let analysis = Self::assemble(cpp.items, swift.items, markers, synonyms);

        tracing::info!(
            cpp = %cpp_path.display(),
            swift = %swift_path.display(),
            test_cases = analysis.declarations.len(),
            sections = model::total_sections(&analysis.declarations),
            methods = analysis.methods.len(),
            unmatched_methods = analysis.matches.unmatched().len(),
            "Analyzed test inventories"
        );

        Ok(analysis)
    }

    fn assemble(
        declarations: Vec<Declaration>,
        methods: Vec<Method>,
        markers: MarkerCounts,
        synonyms: &SynonymTable,
    ) -> Self {
        let matches = MatchTable::build(&declarations, &methods, synonyms);
        Self {
            declarations,
            methods,
            matches,
            markers,
        }
    }

    pub fn functional_tests(&self) -> usize {
        model::total_functional_tests(&self.declarations)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::compare(self.functional_tests(), self.methods.len())
    }

    /// Methods matched by the declaration at `decl_index`.
    pub fn matched_methods(&self, decl_index: usize) -> impl Iterator<Item = &Method> {
        self.matches
            .matches_for(decl_index)
            .iter()
            .map(|&idx| &self.methods[idx])
    }

    /// Methods matched by no declaration.
    pub fn unmatched_methods(&self) -> impl Iterator<Item = &Method> {
        self.matches
            .unmatched()
            .iter()
            .map(|&idx| &self.methods[idx])
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            cpp_framework: CPP_FRAMEWORK,
            swift_framework: SWIFT_FRAMEWORK,
            test_cases: self.declarations.len(),
            sections: model::total_sections(&self.declarations),
            functional_tests: self.functional_tests(),
            test_methods: self.methods.len(),
            cpp_reported: self.markers.test_case_lines,
            swift_reported: self.markers.test_method_lines,
            unmatched_methods: self.matches.unmatched().len(),
            unmatched_declarations: self.matches.unmatched_declaration_count(),
            verdict: self.verdict(),
        }
    }
}
