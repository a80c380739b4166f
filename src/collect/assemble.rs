//! Combines the tree rendering and the collected files into one result

use crate::collect::pipeline::{CollectOutcome, CollectProgress, CollectionPipeline, ReadFailure};
use crate::collect::tree::TreeRenderer;
use crate::config::CollectorConfig;
use crate::core::error::{CollectorError, Result};
use crate::core::types::TraversalResult;
use crate::ignore::{GlobalRuleSet, IgnoreRuleSet, InclusionPolicy, PatternFailure};
use std::path::Path;
use tracing::info;

/// Result of one run plus everything that went wrong along the way
#[derive(Debug)]
pub struct Collection {
    pub result: TraversalResult,
    /// Set when the walk aborted; `result` then holds the partial files
    pub walk_error: Option<CollectorError>,
    pub read_failures: Vec<ReadFailure>,
    pub pattern_failures: Vec<PatternFailure>,
}

impl Collection {
    /// True when the walk finished without a fatal error
    pub fn is_complete(&self) -> bool {
        self.walk_error.is_none()
    }

    /// The result, or the fatal walk error if there was one
    pub fn into_result(self) -> Result<TraversalResult> {
        match self.walk_error {
            Some(e) => Err(e),
            None => Ok(self.result),
        }
    }
}

/// Merges the outputs of the tree renderer and the collection pipeline
pub struct ResultAssembler;

impl ResultAssembler {
    pub fn assemble(
        tree: String,
        outcome: CollectOutcome,
        pattern_failures: Vec<PatternFailure>,
    ) -> Collection {
        Collection {
            result: TraversalResult::new(tree, outcome.files),
            walk_error: outcome.walk_error,
            read_failures: outcome.read_failures,
            pattern_failures,
        }
    }
}

/// Runs the tree renderer and the collection pipeline over one root
///
/// Every call builds a fresh rule set, so `.gitignore` files are re-read
/// on each run and never cached across runs.
#[derive(Debug, Clone)]
pub struct CodeCollector {
    extensions: Vec<String>,
    global_rules: GlobalRuleSet,
    workers: usize,
}

impl CodeCollector {
    /// Create a collector; `workers` of 0 selects the default pool size
    pub fn new(extensions: Vec<String>, global_rules: GlobalRuleSet, workers: usize) -> Self {
        Self {
            extensions,
            global_rules,
            workers,
        }
    }

    /// Create a collector from a resolved configuration
    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::new(
            config.include_extensions.clone(),
            GlobalRuleSet::from_patterns(&config.ignore_patterns),
            config.concurrency.unwrap_or(0),
        )
    }

    pub fn global_rules(&self) -> &GlobalRuleSet {
        &self.global_rules
    }

    /// Collect `root`
    ///
    /// Only failing to start the worker pool is an `Err`; a walk error is
    /// reported inside the returned `Collection` with the partial result.
    pub fn collect(&self, root: &Path) -> Result<Collection> {
        self.run(root, None::<fn(&CollectProgress)>)
    }

    /// Collect `root`, reporting progress after every file read
    pub fn collect_with_progress<F>(&self, root: &Path, callback: F) -> Result<Collection>
    where
        F: Fn(&CollectProgress) + Send + Sync + 'static,
    {
        self.run(root, Some(callback))
    }

    fn run<F>(&self, root: &Path, callback: Option<F>) -> Result<Collection>
    where
        F: Fn(&CollectProgress) + Send + Sync + 'static,
    {
        info!("Starting collection of {}", root.display());
        let policy = InclusionPolicy::new(
            self.extensions.clone(),
            IgnoreRuleSet::new(self.global_rules.clone()),
        );

        let tree = TreeRenderer::new(&policy).render(root);

        let mut pipeline = CollectionPipeline::new(&policy, self.workers)?;
        if let Some(callback) = callback {
            pipeline = pipeline.with_progress(callback);
        }
        let outcome = pipeline.collect(root);

        Ok(ResultAssembler::assemble(
            tree,
            outcome,
            policy.rules().pattern_failures(),
        ))
    }
}
