//! Code Collector - gather a source tree into a single document
//!
//! Code Collector walks a directory, decides per path whether it is collected
//! using an extension allow-list plus gitignore-style rules, reads the
//! collected files concurrently and produces the directory tree together with
//! the file contents.
//!
//! # Core Features
//!
//! - **Ignore rules**: global patterns from configuration and `.gitignore`
//!   files at any depth, matched against every sub-path of a file
//! - **Glob translation**: `*`, `?` and the `**` directory wildcard turned into
//!   anchored regular expressions
//! - **Concurrent reads**: one walk, a bounded worker pool, partial results
//!   kept when the walk fails
//! - **Exports**: JSON, plain text and Markdown
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use codecollector::{CodeCollector, GlobalRuleSet};
//! use std::path::Path;
//!
//! let collector = CodeCollector::new(
//!     vec![".rs".to_string()],
//!     GlobalRuleSet::from_patterns(["target"]),
//!     0,
//! );
//! let collection = collector.collect(Path::new("./my-project"))?;
//!
//! println!("{}", collection.result.tree);
//! for file in &collection.result.files {
//!     println!("{} ({} bytes)", file.relative_path, file.content.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod collect;
pub mod config;
pub mod core;
pub mod export;
pub mod ignore;
pub mod repo;

// Re-export commonly used types
pub use crate::core::{
    error::{CollectorError, Result},
    types::{FileRecord, IgnoreRule, TraversalResult},
};

pub use collect::{CodeCollector, Collection};
pub use config::CollectorConfig;
pub use export::OutputFormat;
pub use ignore::{GlobalRuleSet, IgnoreRuleSet, InclusionPolicy};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
