//! Markdown report renderers and the CI script template.
//!
//! Every renderer is a pure function of an [`Analysis`](crate::analysis::Analysis)
//! and a timestamp string; nothing here touches the clock or the filesystem.
//!
//! - `parity`: summary statistics, per-case mapping, verification result
//! - `mapping`: executive verdict, per-case verdicts, recommendations
//! - `explain`: framework counting explanation
//! - `ci_script`: bash template with the counts baked in

pub mod ci_script;
pub mod explain;
pub mod mapping;
pub mod parity;

/// Timestamp in the format stamped into report headers.
pub fn utc_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

/// Body lines of the `## {heading}` section: everything after the heading
/// up to (not including) the next `##`-prefixed line.
pub fn section_body<'a>(report: &'a str, heading: &str) -> Vec<&'a str> {
    let marker = format!("## {heading}");
    let mut lines = report.lines();
    if !lines.any(|line| line.starts_with(&marker)) {
        return Vec::new();
    }
    lines.take_while(|line| !line.starts_with("##")).collect()
}
