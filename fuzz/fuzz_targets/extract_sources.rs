#![no_main]

use libfuzzer_sys::fuzz_target;
use parity_core::analysis::Analysis;
use parity_core::matcher::SynonymTable;
use parity_core::model::total_functional_tests;
use parity_core::report::{ci_script, explain, mapping, parity};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First half is read as the Catch2 file, second half as the XCTest file.
    let mid = (0..=text.len() / 2)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let (cpp, swift) = text.split_at(mid);

    let analysis = Analysis::from_sources(cpp, swift, &SynonymTable::builtin());

    assert!(total_functional_tests(&analysis.declarations) >= analysis.declarations.len());
    assert!(analysis.declarations.len() <= analysis.markers.test_case_lines);
    for decl in &analysis.declarations {
        if let Some(end) = decl.scope_end {
            assert!(end >= decl.line);
        }
    }

    let stats = analysis.statistics();
    let _ = parity::render(&analysis, "fuzz");
    let _ = mapping::render(&analysis, "fuzz");
    let _ = explain::render(&stats);
    let _ = ci_script::render(&stats);
});
