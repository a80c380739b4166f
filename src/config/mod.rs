//! Configuration loading
//!
//! Reads the YAML configuration that supplies the extension allow-list, the
//! global ignore patterns and the worker count.

pub mod collector_config;

// Re-export commonly used items
pub use collector_config::{CollectorConfig, DEFAULT_CONFIG_FILE};
