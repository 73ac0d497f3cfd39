use clap::{Parser, Subcommand};
use parity_core::analysis::{Analysis, Statistics};
use parity_core::config::Config;
use parity_core::logging::{LogConfig, LogFormat, init_logging};
use parity_core::matcher::SynonymTable;
use parity_core::output::{self, Artifact};
use parity_core::report::{self, ci_script, explain, mapping, parity};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "parity",
    version,
    about = "Compare Catch2 and XCTest test inventories"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project root that input and output paths are relative to"
    )]
    root: PathBuf,
    #[arg(long, global = true, help = "Config file (default: <root>/parity.toml if present)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, help = "Log level filter (overrides config)")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Log format: pretty or json (overrides config)")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Write the test parity analysis report
    Parity,
    /// Write the detailed per-case mapping report
    Mapping,
    /// Write the count explanation and the CI check script
    Explain,
}

impl Commands {
    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Parity => "Error analyzing test parity",
            Self::Mapping => "Analysis failed",
            Self::Explain => "Enhancement failed",
        }
    }
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(command = ?command, error = %err, "Command failed");
            eprintln!("❌ {}: {err}", command.failure_prefix());
            if let Some(remediation) = err
                .downcast_ref::<parity_core::Error>()
                .and_then(parity_core::Error::remediation)
            {
                eprintln!();
                eprint!("{}", remediation.render_plain());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.root, cli.config.as_deref()).map_err(parity_core::Error::from)?;

    let log_config = LogConfig {
        level: cli.log_level.clone().unwrap_or(config.logging.level.clone()),
        format: cli.log_format.unwrap_or(config.logging.format),
        file: config.logging.file.clone(),
    };
    init_logging(&log_config)?;
    match &config.source {
        Some(path) => tracing::debug!(path = %path.display(), "Loaded config"),
        None => tracing::debug!(root = %cli.root.display(), "No parity.toml found; using defaults"),
    }
    tracing::info!(command = ?cli.command, root = %cli.root.display(), "Running command");

    let synonyms = SynonymTable::builtin().with_overrides(&config.synonyms);
    let cpp = Config::resolve(&cli.root, &config.inputs.cpp);
    let swift = Config::resolve(&cli.root, &config.inputs.swift);
    let analysis = Analysis::load(&cpp, &swift, &synonyms)?;
    let stats = analysis.statistics();

    let outputs = &config.outputs;
    match cli.command {
        Commands::Parity => {
            let path = Config::resolve(&cli.root, &outputs.parity_report);
            let content = parity::render(&analysis, &report::utc_timestamp());
            write_report(&path, &content)?;
            print_summary(cli.json, &stats, || {
                let mut lines = vec![
                    "✅ Test parity analysis complete!".to_string(),
                    format!("📄 Report saved to: {}", path.display()),
                    String::new(),
                ];
                let body = report::section_body(&content, parity::SUMMARY_HEADING);
                if !body.is_empty() {
                    lines.push(format!("## {}", parity::SUMMARY_HEADING));
                    lines.extend(body.into_iter().map(str::to_string));
                }
                lines
            })?;
        }
        Commands::Mapping => {
            let path = Config::resolve(&cli.root, &outputs.mapping_report);
            let content = mapping::render(&analysis, &report::utc_timestamp());
            write_report(&path, &content)?;
            print_summary(cli.json, &stats, || {
                let mut lines = vec![
                    "📊 Comprehensive Test Analysis Complete!".to_string(),
                    format!("📄 Full report: {}", path.display()),
                    String::new(),
                ];
                lines.extend(
                    report::section_body(&content, mapping::SUMMARY_HEADING)
                        .into_iter()
                        .filter(|line| !line.trim().is_empty())
                        .map(str::to_string),
                );
                lines
            })?;
        }
        Commands::Explain => {
            let report_path = Config::resolve(&cli.root, &outputs.explanation_report);
            let script_path = Config::resolve(&cli.root, &outputs.ci_script);
            let explanation = explain::render(&stats);
            let script = ci_script::render(&stats);
            output::write_all(&[
                Artifact::report(&report_path, &explanation),
                Artifact::script(&script_path, &script),
            ])
            .map_err(parity_core::Error::from)?;
            print_summary(cli.json, &stats, || {
                let mut lines = vec![
                    "✅ Test count analysis and CI enhancement complete!".to_string(),
                    format!("📄 Explanation report: {}", report_path.display()),
                    format!("🔧 Enhanced CI script: {}", script_path.display()),
                    String::new(),
                    "Key Findings:".to_string(),
                ];
                lines.extend(
                    explain::key_findings(&stats)
                        .into_iter()
                        .map(|finding| format!("  {finding}")),
                );
                lines
            })?;
        }
    }

    Ok(())
}

fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    output::write_report(path, content).map_err(parity_core::Error::from)?;
    Ok(())
}

fn print_summary(
    json: bool,
    stats: &Statistics,
    lines: impl FnOnce() -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        let data = stats.clone();
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })
                .map_err(parity_core::Error::from)?
        );
    } else {
        for line in lines() {
            println!("{line}");
        }
    }
    Ok(())
}
