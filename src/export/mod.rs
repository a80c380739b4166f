//! Writing a traversal result to disk
//!
//! Three renderings are supported: pretty JSON, a plain-text report and a
//! Markdown report with fenced code blocks.

use crate::core::error::{CollectorError, Result};
use crate::core::types::TraversalResult;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub mod json;
pub mod markdown;
pub mod text;

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Markdown,
}

impl OutputFormat {
    /// File extension appended to the output stem
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "markdown" => Ok(OutputFormat::Markdown),
            other => Err(CollectorError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Render `result` in the given format
pub fn render(result: &TraversalResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(result),
        OutputFormat::Text => Ok(text::render(result)),
        OutputFormat::Markdown => Ok(markdown::render(result)),
    }
}

/// Output file for `stem`, e.g. `collected_code` becomes `collected_code.json`
pub fn output_path(stem: &Path, format: OutputFormat) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Render `result` and write it next to `stem`, returning the file written
pub fn export(result: &TraversalResult, stem: &Path, format: OutputFormat) -> Result<PathBuf> {
    let path = output_path(stem, format);
    let content = render(result, format)?;
    std::fs::write(&path, content)?;
    info!("Wrote {} output to {}", format, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FileRecord;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_names() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(CollectorError::UnsupportedFormat { .. })
        ));
        assert_eq!(OutputFormat::default().to_string(), "json");
    }

    #[test]
    fn test_output_path_appends_extension() {
        let stem = Path::new("out/collected_code");
        assert_eq!(output_path(stem, OutputFormat::Json), Path::new("out/collected_code.json"));
        assert_eq!(output_path(stem, OutputFormat::Text), Path::new("out/collected_code.txt"));
        assert_eq!(output_path(stem, OutputFormat::Markdown), Path::new("out/collected_code.md"));
    }

    #[test]
    fn test_export_writes_each_format() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let stem = temp_dir.path().join("report");
        let result = TraversalResult::new(
            "root/\nmain.go\n".to_string(),
            vec![FileRecord::new("main.go", b"package main".to_vec())],
        );

        for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Markdown] {
            let path = export(&result, &stem, format)?;
            let written = fs::read_to_string(&path)?;
            assert!(written.contains("package main"), "{} output", format);
        }

        Ok(())
    }
}
