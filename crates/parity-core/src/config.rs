//! Configuration management for parity
//!
//! Handles loading of the optional `parity.toml` file. Every field has a
//! default, so an absent file (or an empty one) reproduces the fixed project
//! layout: `CPP/test.cpp` against the ExpressionKit XCTest suite, with the
//! reports written next to them.

use crate::error::ConfigError;
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "parity.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Test sources
    pub inputs: InputsConfig,

    /// Report destinations
    pub outputs: OutputsConfig,

    /// Logging settings
    pub logging: LogConfig,

    /// Extra or replacement match synonyms, keyed by exact tag
    pub synonyms: BTreeMap<String, Vec<String>>,

    /// File this config was read from; `None` for built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Test source locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Catch2 file with `TEST_CASE` / `SECTION` declarations
    pub cpp: PathBuf,
    /// XCTest file with `func testXxx()` methods
    pub swift: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            cpp: PathBuf::from("CPP/test.cpp"),
            swift: PathBuf::from("Swift/Tests/ExpressionKitTests/ExpressionKitTests.swift"),
        }
    }
}

/// Report destinations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputsConfig {
    pub parity_report: PathBuf,
    pub mapping_report: PathBuf,
    pub explanation_report: PathBuf,
    pub ci_script: PathBuf,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            parity_report: PathBuf::from("TESTING_PARITY_ANALYSIS.md"),
            mapping_report: PathBuf::from("TESTING_PARITY_DETAILED.md"),
            explanation_report: PathBuf::from("TEST_COUNT_EXPLANATION.md"),
            ci_script: PathBuf::from("scripts/enhanced_test_check.sh"),
        }
    }
}

impl Config {
    /// Load configuration for a project.
    ///
    /// An explicit path must exist. Without one, `parity.toml` in `root` is
    /// used when present, otherwise the defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            return Self::load_from(path);
        }

        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.display().to_string(), e.to_string()))?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;

    #[test]
    fn default_config_matches_fixed_layout() {
        let config = Config::default();
        assert_eq!(config.inputs.cpp, PathBuf::from("CPP/test.cpp"));
        assert!(config.inputs.swift.ends_with("ExpressionKitTests.swift"));
        assert_eq!(
            config.outputs.ci_script,
            PathBuf::from("scripts/enhanced_test_check.sh")
        );
        assert_eq!(config.logging.level, "info");
        assert!(config.synonyms.is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.inputs.cpp, InputsConfig::default().cpp);
        assert_eq!(
            config.outputs.mapping_report,
            OutputsConfig::default().mapping_report
        );
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
[inputs]
cpp = "native/tests.cpp"

[logging]
format = "json"

[synonyms]
parser = ["parse", "syntax"]
"#,
        )
        .unwrap();
        assert_eq!(config.inputs.cpp, PathBuf::from("native/tests.cpp"));
        assert_eq!(config.inputs.swift, InputsConfig::default().swift);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.synonyms["parser"], vec!["parse", "syntax"]);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("[inputs\ncpp = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = Config::load(tmp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_picks_up_root_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "[outputs]\nparity_report = \"out/parity.md\"\n",
        )
        .unwrap();
        let config = Config::load(tmp.path(), None).unwrap();
        assert_eq!(config.outputs.parity_report, PathBuf::from("out/parity.md"));
        assert_eq!(config.source, Some(tmp.path().join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load(tmp.path(), None).unwrap();
        assert_eq!(config.inputs.cpp, PathBuf::from("CPP/test.cpp"));
        assert!(config.source.is_none());
    }

    #[test]
    fn explicit_config_records_its_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("ci.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        let config = Config::load(tmp.path(), Some(&path)).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert!(Config::from_toml_str("").unwrap().source.is_none());
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(
            Config::resolve(root, Path::new("CPP/test.cpp")),
            PathBuf::from("/project/CPP/test.cpp")
        );
        assert_eq!(
            Config::resolve(root, Path::new("/abs/test.cpp")),
            PathBuf::from("/abs/test.cpp")
        );
    }
}
