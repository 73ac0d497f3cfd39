//! parity-core: Core library for parity
//!
//! This crate compares the test inventory of a Catch2 suite (`TEST_CASE` /
//! `SECTION`) against an XCTest suite (`func testXxx()`) that exercises the
//! same library, and renders markdown reports that explain why the two
//! frameworks report different test counts.
//!
//! # Architecture
//!
//! ```text
//! CPP/test.cpp ─┐
//!               ├→ extract → matcher → report → output
//! *.swift ──────┘
//! ```
//!
//! # Modules
//!
//! - `model`: Declarations, sub-declarations, methods and marker counts
//! - `extract`: Line-oriented regex extraction of the two inventories
//! - `matcher`: Candidate-pattern match heuristic and the match table
//! - `analysis`: One-shot pipeline (read → extract → match) and statistics
//! - `report`: Markdown renderers and the CI script template
//! - `output`: Writing reports and executable scripts to disk
//! - `config`: `parity.toml` loading
//! - `logging`: `tracing` subscriber setup
//! - `error`: Error types with remediation hints
//!
//! # Safety
//!
//! This crate forbids unsafe code.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod output;
pub mod report;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
