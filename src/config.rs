//! Configuration management for the ATS advisor

use crate::error::{AdvisorError, Result};
use crate::processing::critical::{CriticalScan, DEFAULT_CONTEXT_WINDOW};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Characters inspected on each side of a skill when looking for "required" markers
    pub context_window: usize,
    pub critical_scan: CriticalScan,
}

/// Extra skill phrases merged into the built-in vocabulary, keyed by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub extra_skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            critical_scan: CriticalScan::FirstOccurrence,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `path`, creating it with defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AdvisorError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AdvisorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-advisor")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.context_window, 100);
        assert_eq!(config.scoring.critical_scan, CriticalScan::FirstOccurrence);
        assert!(config.vocabulary.extra_skills.is_empty());
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scoring]
context_window = 60
critical_scan = "all_occurrences"

[vocabulary.extra_skills]
cloud = ["pulumi"]
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scoring.context_window, 60);
        assert_eq!(config.scoring.critical_scan, CriticalScan::AllOccurrences);
        assert_eq!(config.vocabulary.extra_skills["cloud"], vec!["pulumi".to_string()]);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[output]\nformat = \"markdown\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(config.output.color_output);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_save_round_trips_extra_skills() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.vocabulary.extra_skills.insert("web".to_string(), vec!["graphql".to_string()]);
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = 12").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AdvisorError::Configuration(_)));
    }
}
