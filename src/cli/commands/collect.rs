//! Collect command implementation

use crate::cli::Cli;
use crate::collect::{CodeCollector, CollectProgress, Collection};
use crate::config::CollectorConfig;
use crate::export;
use crate::repo::clone_repository;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Execute the collect command
pub fn execute(cli: &Cli) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let config =
        CollectorConfig::discover(&working_dir, cli.config.as_deref())?.with_concurrency(cli.jobs);

    // Keep the checkout alive until the export is written
    let cloned = match &cli.github {
        Some(url) => {
            println!("  {} Cloning {} ({})...", "•".cyan(), url, cli.branch);
            Some(clone_repository(url, &cli.branch)?)
        },
        None => None,
    };

    let root: PathBuf = match (&cloned, &cli.directory) {
        (Some(repo), _) => repo.path().to_path_buf(),
        (None, Some(directory)) => directory.clone(),
        (None, None) => anyhow::bail!("Either --directory or --github is required"),
    };

    let collector = CodeCollector::from_config(&config);

    info!("Global ignore rules:");
    for rule in collector.global_rules().rules() {
        info!("- Pattern: {}, Source: {}", rule.pattern, rule.source);
    }

    let progress = if cli.no_progress {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    };
    progress.set_message(format!("Collecting {}...", root.display()));

    let callback_progress = progress.clone();
    let collection = collector.collect_with_progress(&root, move |p: &CollectProgress| {
        callback_progress.set_message(format!("Read {}/{} files", p.completed, p.dispatched));
    })?;
    progress.finish_and_clear();

    report_problems(&collection);

    // A failed walk still leaves a usable partial result on disk
    let output = export::export(&collection.result, &cli.output, cli.output_format)?;

    match collection.walk_error {
        Some(e) => {
            println!(
                "{} Collection incomplete, partial result written to {}",
                "✗".red(),
                output.display()
            );
            Err(e.into())
        },
        None => {
            println!(
                "{} Collected {} files into {}",
                "✓".green(),
                collection.result.files.len(),
                output.display().to_string().bright_white()
            );
            Ok(())
        },
    }
}

fn report_problems(collection: &Collection) {
    for failure in &collection.pattern_failures {
        warn!("Ignoring unusable pattern {}: {}", failure.rule, failure.reason);
        println!(
            "  {} Unusable ignore pattern {}",
            "!".yellow(),
            failure.rule.to_string().yellow()
        );
    }

    for failure in &collection.read_failures {
        println!(
            "  {} Skipped {}: {}",
            "!".yellow(),
            failure.path.display(),
            failure.error
        );
    }
}
