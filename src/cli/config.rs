//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file:
//!
//! ```toml
//! # vcfcodec.toml
//! [write]
//! samples = ["SAMPLE1", "SAMPLE2"]
//! supplement = "annotations.json"
//! allele_balance = true
//! ```
//!
//! Explicit command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for vcfcodec.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Output settings.
    #[serde(default)]
    pub write: WriteConfig,
}

/// Configuration for the roundtrip command.
#[derive(Debug, Default, Deserialize)]
pub struct WriteConfig {
    /// Samples to keep; an empty list drops all sample columns.
    pub samples: Option<Vec<String>>,

    /// Supplementary field metadata (JSON).
    pub supplement: Option<PathBuf>,

    /// Add the derived allele balance field.
    pub allele_balance: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [write]
            samples = ["S1", "S3"]
            supplement = "annotations.json"
            allele_balance = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.write.samples,
            Some(vec!["S1".to_string(), "S3".to_string()])
        );
        assert_eq!(config.write.supplement, Some(PathBuf::from("annotations.json")));
        assert_eq!(config.write.allele_balance, Some(true));
    }

    #[test]
    fn test_empty_sample_list() {
        let toml = r#"
            [write]
            samples = []
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.write.samples, Some(Vec::new()));
        assert_eq!(config.write.supplement, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.write.samples, None);
        assert_eq!(config.write.allele_balance, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[write]\nsamples = 3").is_err());
    }
}
