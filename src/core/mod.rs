//! Core types and error handling for Code Collector
//!
//! This module contains the data model shared by the ignore engine, the
//! traversal components and the exporters.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{CollectorError, Result};
pub use types::{FileRecord, IgnoreRule, TraversalResult, USER_CONFIG_SOURCE};
