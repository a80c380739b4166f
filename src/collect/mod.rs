//! Directory traversal and file collection
//!
//! A run renders the directory tree, reads every included file on a worker
//! pool and assembles both into a [`TraversalResult`](crate::core::types::TraversalResult).

pub mod assemble;
pub mod pipeline;
pub mod tree;

// Re-export commonly used items
pub use assemble::{CodeCollector, Collection, ResultAssembler};
pub use pipeline::{
    default_workers, CollectOutcome, CollectProgress, CollectionPipeline, PipelineState,
    ReadFailure,
};
pub use tree::TreeRenderer;
