//! Error types for Code Collector

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for collection operations
#[derive(Error, Debug)]
pub enum CollectorError {
    /// A single ignore pattern could not be turned into a matcher
    #[error("Invalid pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A single file could not be read
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be enumerated; fatal to a collection run
    #[error("Failed to walk {}: {}", display_walk_path(.path), .message)]
    Walk {
        path: Option<PathBuf>,
        message: String,
    },

    /// A path could not be expressed relative to the traversal root
    #[error("Path {path} is not under root {root}")]
    PathResolution { path: PathBuf, root: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Repository fetch errors
    #[error("Failed to clone {url}: {reason}")]
    Clone { url: String, reason: String },

    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CollectorError {
    /// Create a new pattern error
    pub fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a new file read error
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRead { path, source }
    }

    /// Create a new walk error
    pub fn walk(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path,
            message: message.into(),
        }
    }

    /// Create a new path resolution error
    pub fn path_resolution(path: PathBuf, root: PathBuf) -> Self {
        Self::PathResolution { path, root }
    }

    /// Create a new configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a new clone error
    pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Clone {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a collection run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Walk { .. })
    }
}

impl From<walkdir::Error> for CollectorError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        let message = match err.io_error() {
            Some(io) => io.to_string(),
            None => err.to_string(),
        };
        Self::Walk { path, message }
    }
}

fn display_walk_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<unknown>".to_string(),
    }
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, CollectorError>;
