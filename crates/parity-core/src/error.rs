//! Error types for parity-core

use std::fmt::Write;
use thiserror::Error;

/// Remediation command for resolving an error
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RemediationCommand {
    /// Short label describing the command purpose
    pub label: String,
    /// Command to run
    pub command: String,
}

/// Actionable remediation guidance for an error
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Remediation {
    /// One-line summary of how to fix the issue
    pub summary: String,
    /// Suggested commands to resolve or diagnose the issue
    pub commands: Vec<RemediationCommand>,
    /// Additional alternative guidance
    pub alternatives: Vec<String>,
}

impl Remediation {
    /// Create a new remediation with a summary
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            commands: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Add a suggested command
    #[must_use]
    pub fn command(mut self, label: impl Into<String>, command: impl Into<String>) -> Self {
        self.commands.push(RemediationCommand {
            label: label.into(),
            command: command.into(),
        });
        self
    }

    /// Add an alternative suggestion
    #[must_use]
    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// Render remediation text for human-readable output
    #[must_use]
    pub fn render_plain(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "To fix:");
        let _ = writeln!(output, "  {}", self.summary);

        if !self.commands.is_empty() {
            let _ = writeln!(output, "  Commands:");
            for cmd in &self.commands {
                let _ = writeln!(output, "    - {}: {}", cmd.label, cmd.command);
            }
        }

        if !self.alternatives.is_empty() {
            let _ = writeln!(output, "  Alternatives:");
            for alt in &self.alternatives {
                let _ = writeln!(output, "    - {alt}");
            }
        }

        output
    }
}

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for parity-core
#[derive(Error, Debug)]
pub enum Error {
    /// Source file errors (missing, unreadable, not UTF-8)
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Report and script write errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Return remediation guidance when available.
    #[must_use]
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            Self::Input(err) => Some(err.remediation()),
            Self::Config(err) => Some(err.remediation()),
            Self::Output(err) => Some(err.remediation()),
            Self::Json(_) => Some(
                Remediation::new("Statistics could not be serialized. Retry without --json.")
                    .command("Human summary", "parity mapping"),
            ),
        }
    }
}

/// Errors reading one of the two test sources
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Test source not found: {0}")]
    NotFound(String),

    #[error("Failed to read test source {0}: {1}")]
    ReadFailed(String, String),

    #[error("Test source is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl InputError {
    /// Classify an I/O failure on `path`.
    #[must_use]
    pub fn from_io(path: &std::path::Path, err: &std::io::Error) -> Self {
        let display = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::InvalidData => Self::InvalidUtf8(display),
            _ => Self::ReadFailed(display, err.to_string()),
        }
    }

    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::NotFound(path) => Remediation::new(format!(
                "Test source not found: {path}. Run from the project root or pass --root."
            ))
            .command("Check path", format!("ls -l \"{path}\""))
            .alternative("Override the path under [inputs] in parity.toml."),
            Self::ReadFailed(path, _) => Remediation::new(format!(
                "Failed to read test source: {path}. Check permissions."
            ))
            .command("Check permissions", format!("ls -l \"{path}\""))
            .alternative("Ensure the file is readable by the current user."),
            Self::InvalidUtf8(path) => {
                Remediation::new("Test sources must be UTF-8 encoded text.")
                    .command("Detect encoding", format!("file \"{path}\""))
                    .alternative("Convert the file with iconv and retry.")
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file {0}: {1}")]
    ReadFailed(String, String),

    #[error("Failed to parse config: {0}")]
    ParseFailed(String),
}

impl ConfigError {
    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::FileNotFound(path) => Remediation::new(format!(
                "Config file not found: {path}. Verify the path and retry."
            ))
            .command("Check path", format!("ls -l \"{path}\""))
            .alternative("Pass --config with the correct path."),
            Self::ReadFailed(path, _) => Remediation::new(format!(
                "Failed to read config file: {path}. Check permissions."
            ))
            .command("Check permissions", format!("ls -l \"{path}\""))
            .alternative("Ensure the file is readable by the current user."),
            Self::ParseFailed(_) => {
                Remediation::new("Config parse failed. Fix the TOML syntax and retry.")
                    .command("Run with defaults", "parity --config /dev/null mapping")
                    .alternative("Remove parity.toml to fall back to built-in defaults.")
            }
        }
    }
}

/// Errors writing reports or the CI script
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {0}: {1}")]
    WriteFailed(String, String),

    #[error("Failed to create directory {0}: {1}")]
    CreateDirFailed(String, String),

    #[error("Failed to set permissions on {0}: {1}")]
    PermissionsFailed(String, String),
}

impl OutputError {
    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::WriteFailed(path, _) => Remediation::new(format!(
                "Could not write {path}. Check that the project root is writable."
            ))
            .command("Check permissions", "ls -ld .")
            .alternative("Point [outputs] in parity.toml at a writable location."),
            Self::CreateDirFailed(path, _) => {
                Remediation::new(format!("Could not create directory {path}."))
                    .command("Create manually", format!("mkdir -p \"{path}\""))
            }
            Self::PermissionsFailed(path, _) => Remediation::new(format!(
                "Script written but not marked executable: {path}."
            ))
            .command("Mark executable", format!("chmod 755 \"{path}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn remediation_available_for_error_variants() {
        let json_err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let errors = vec![
            Error::Input(InputError::NotFound("CPP/test.cpp".to_string())),
            Error::Input(InputError::ReadFailed(
                "CPP/test.cpp".to_string(),
                "denied".to_string(),
            )),
            Error::Input(InputError::InvalidUtf8("CPP/test.cpp".to_string())),
            Error::Config(ConfigError::FileNotFound("parity.toml".to_string())),
            Error::Config(ConfigError::ReadFailed(
                "parity.toml".to_string(),
                "io".to_string(),
            )),
            Error::Config(ConfigError::ParseFailed("parse".to_string())),
            Error::Output(OutputError::WriteFailed(
                "report.md".to_string(),
                "io".to_string(),
            )),
            Error::Output(OutputError::CreateDirFailed(
                "scripts".to_string(),
                "io".to_string(),
            )),
            Error::Output(OutputError::PermissionsFailed(
                "scripts/x.sh".to_string(),
                "io".to_string(),
            )),
            Error::Json(json_err),
        ];

        for error in errors {
            let remediation = error.remediation().expect("missing remediation");
            assert!(
                !remediation.summary.is_empty(),
                "remediation summary empty for {error:?}"
            );
            assert!(
                !remediation.commands.is_empty(),
                "remediation commands empty for {error:?}"
            );
        }
    }

    #[test]
    fn remediation_builder_chain() {
        let r = Remediation::new("summary")
            .command("Run", "parity mapping")
            .alternative("Try something else");

        assert_eq!(r.summary, "summary");
        assert_eq!(r.commands.len(), 1);
        assert_eq!(r.commands[0].label, "Run");
        assert_eq!(r.alternatives, vec!["Try something else"]);
    }

    #[test]
    fn render_plain_omits_empty_sections() {
        let output = Remediation::new("Fix it").render_plain();
        assert!(output.contains("To fix:"));
        assert!(!output.contains("Commands:"));
        assert!(!output.contains("Alternatives:"));
    }

    #[test]
    fn render_plain_includes_commands_and_alternatives() {
        let output = Remediation::new("Fix it")
            .command("Diagnose", "ls -la")
            .alternative("Try plan B")
            .render_plain();
        assert!(output.contains("Diagnose: ls -la"));
        assert!(output.contains("Try plan B"));
    }

    #[test]
    fn input_error_classifies_io_kinds() {
        let path = Path::new("CPP/test.cpp");
        let not_found = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert!(matches!(
            InputError::from_io(path, &not_found),
            InputError::NotFound(p) if p == "CPP/test.cpp"
        ));

        let invalid = std::io::Error::from(std::io::ErrorKind::InvalidData);
        assert!(matches!(
            InputError::from_io(path, &invalid),
            InputError::InvalidUtf8(_)
        ));

        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(matches!(
            InputError::from_io(path, &denied),
            InputError::ReadFailed(_, _)
        ));
    }

    #[test]
    fn error_display_includes_context() {
        let err = Error::Input(InputError::NotFound("Swift/x.swift".to_string()));
        assert!(err.to_string().contains("Swift/x.swift"));
        assert!(err.to_string().starts_with("Input error"));
    }
}
