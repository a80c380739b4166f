//! Collector configuration
//!
//! Settings live in a YAML file. `./config.yaml` is read when it exists and an
//! explicit file given on the command line is layered on top of it.

use crate::core::error::{CollectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Resolved configuration for a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Extension allow-list such as `.go`; empty means every extension
    #[serde(default)]
    pub include_extensions: Vec<String>,
    /// Global ignore patterns
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Worker count for file reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

/// A configuration file as written, where missing keys stay unset
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigLayer {
    include_extensions: Option<Vec<String>>,
    ignore_patterns: Option<Vec<String>>,
    concurrency: Option<usize>,
}

impl CollectorConfig {
    /// Load a single configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.overlay_file(path)?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.overlay_yaml(content)?;
        Ok(config)
    }

    /// Build the run configuration
    ///
    /// `config.yaml` in `working_dir` is applied first when present, then
    /// `explicit`, which must exist.
    pub fn discover(working_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            info!("Loading default configuration from {}", default_path.display());
            config.overlay_file(&default_path)?;
        }

        if let Some(path) = explicit {
            info!("Loading configuration from {}", path.display());
            config.overlay_file(path)?;
        }

        Ok(config)
    }

    /// Apply a YAML file on top of this configuration
    pub fn overlay_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CollectorError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.overlay_yaml(&content).map_err(|e| match e {
            CollectorError::Yaml(e) => {
                CollectorError::config(format!("Failed to parse {}: {}", path.display(), e))
            },
            other => other,
        })
    }

    /// Apply YAML text on top of this configuration
    ///
    /// Only keys present in `content` replace current values.
    pub fn overlay_yaml(&mut self, content: &str) -> Result<()> {
        // A document without any value has nothing to overlay
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(());
        }
        let layer: Option<ConfigLayer> = serde_yaml::from_str(content)?;
        if let Some(layer) = layer {
            self.apply(layer);
        }
        Ok(())
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(extensions) = layer.include_extensions {
            debug!("include_extensions = {:?}", extensions);
            self.include_extensions = extensions;
        }
        if let Some(patterns) = layer.ignore_patterns {
            debug!("ignore_patterns = {:?}", patterns);
            self.ignore_patterns = patterns;
        }
        if let Some(concurrency) = layer.concurrency {
            debug!("concurrency = {}", concurrency);
            self.concurrency = Some(concurrency);
        }
    }

    /// Override the worker count, e.g. from a command-line flag
    pub fn with_concurrency(mut self, workers: Option<usize>) -> Self {
        if workers.is_some() {
            self.concurrency = workers;
        }
        self
    }

    /// Path of the default configuration file under `working_dir`
    pub fn default_path(working_dir: &Path) -> PathBuf {
        working_dir.join(DEFAULT_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let config = CollectorConfig::from_yaml(
            "include_extensions:\n  - .go\n  - .py\nignore_patterns:\n  - vendor/\n  - '*.log'\nconcurrency: 4\n",
        )?;

        assert_eq!(config.include_extensions, vec![".go", ".py"]);
        assert_eq!(config.ignore_patterns, vec!["vendor/", "*.log"]);
        assert_eq!(config.concurrency, Some(4));

        Ok(())
    }

    #[test]
    fn test_empty_document_is_default() -> Result<()> {
        assert_eq!(CollectorConfig::from_yaml("")?, CollectorConfig::default());
        assert_eq!(CollectorConfig::from_yaml("# nothing\n")?, CollectorConfig::default());
        Ok(())
    }

    #[test]
    fn test_overlay_replaces_only_present_keys() -> Result<()> {
        let mut config = CollectorConfig::from_yaml(
            "include_extensions: [.go]\nignore_patterns: [build]\n",
        )?;
        config.overlay_yaml("ignore_patterns: [dist, '*.tmp']\n")?;

        assert_eq!(config.include_extensions, vec![".go"]);
        assert_eq!(config.ignore_patterns, vec!["dist", "*.tmp"]);
        assert_eq!(config.concurrency, None);

        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_config_error() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "include_extensions: [.go\n")?;

        let err = CollectorConfig::load(&path).unwrap_err();
        assert!(matches!(err, CollectorError::Config { .. }));
        assert!(err.to_string().contains("broken.yaml"));

        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_fails() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let missing = temp_dir.path().join("nope.yaml");

        let result = CollectorConfig::discover(temp_dir.path(), Some(&missing));
        assert!(matches!(result, Err(CollectorError::Config { .. })));

        Ok(())
    }

    #[test]
    fn test_discover_layers_default_then_explicit() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let work = temp_dir.path();
        fs::write(
            CollectorConfig::default_path(work),
            "include_extensions: [.rs]\nignore_patterns: [target]\n",
        )?;
        let explicit = work.join("ci.yaml");
        fs::write(&explicit, "include_extensions: [.rs, .toml]\n")?;

        let config = CollectorConfig::discover(work, None)?;
        assert_eq!(config.include_extensions, vec![".rs"]);

        let config = CollectorConfig::discover(work, Some(&explicit))?;
        assert_eq!(config.include_extensions, vec![".rs", ".toml"]);
        assert_eq!(config.ignore_patterns, vec!["target"]);

        Ok(())
    }

    #[test]
    fn test_without_default_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config = CollectorConfig::discover(temp_dir.path(), None)?;
        assert_eq!(config, CollectorConfig::default());
        Ok(())
    }

    #[test]
    fn test_flag_overrides_concurrency() -> Result<()> {
        let config = CollectorConfig::from_yaml("concurrency: 3\n")?;
        assert_eq!(config.clone().with_concurrency(None).concurrency, Some(3));
        assert_eq!(config.with_concurrency(Some(8)).concurrency, Some(8));
        Ok(())
    }
}
