//! Core data types for Code Collector

use serde::{Serialize, Serializer};
use std::fmt;

/// Source label for rules that come from the configuration file
pub const USER_CONFIG_SOURCE: &str = "user-config";

/// A single ignore pattern plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    /// The glob pattern as written
    pub pattern: String,
    /// Origin of the rule (".gitignore" path or "user-config"), diagnostic only
    pub source: String,
}

impl IgnoreRule {
    /// Create a new rule
    pub fn new(pattern: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            source: source.into(),
        }
    }

    /// Create a rule that originates from the user configuration
    pub fn from_config(pattern: impl Into<String>) -> Self {
        Self::new(pattern, USER_CONFIG_SOURCE)
    }
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pattern, self.source)
    }
}

/// Content of one collected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the traversal root, always '/'-separated
    pub relative_path: String,
    /// Raw file bytes; serialized as (lossy) UTF-8 text
    #[serde(serialize_with = "serialize_lossy_utf8")]
    pub content: Vec<u8>,
}

impl FileRecord {
    pub fn new(relative_path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
        }
    }

    /// Content decoded as UTF-8, replacing invalid sequences
    pub fn content_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

fn serialize_lossy_utf8<S>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(content))
}

/// Tree rendering plus collected files, handed to the exporters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalResult {
    pub tree: String,
    pub files: Vec<FileRecord>,
}

impl TraversalResult {
    pub fn new(tree: String, files: Vec<FileRecord>) -> Self {
        Self { tree, files }
    }

    /// Relative paths of all collected files, sorted
    pub fn relative_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.iter().map(|f| f.relative_path.as_str()).collect();
        paths.sort_unstable();
        paths
    }
}
