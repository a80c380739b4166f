//! Remote repository checkout
//!
//! Repositories are cloned shallowly with the `git` executable into a
//! temporary directory that is removed when the handle is dropped.

use crate::core::error::{CollectorError, Result};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

/// A checked-out repository living in a temporary directory
#[derive(Debug)]
pub struct ClonedRepo {
    dir: TempDir,
    url: String,
    branch: String,
}

impl ClonedRepo {
    /// Root of the working tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Clone a single branch of `url` at depth 1
pub fn clone_repository(url: &str, branch: &str) -> Result<ClonedRepo> {
    let dir = tempfile::Builder::new()
        .prefix("repo-")
        .tempdir()
        .map_err(|e| CollectorError::clone_failed(url, format!("temporary directory: {}", e)))?;

    info!("Cloning {} ({}) into {}", url, branch, dir.path().display());

    let output = Command::new("git")
        .arg("clone")
        .args(["--depth", "1", "--single-branch", "--branch", branch])
        .arg("--quiet")
        .arg(url)
        .arg(dir.path())
        .output()
        .map_err(|e| CollectorError::clone_failed(url, format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CollectorError::clone_failed(
            url,
            format!("git clone exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    debug!("Clone of {} complete", url);

    Ok(ClonedRepo {
        dir,
        url: url.to_string(),
        branch: branch.to_string(),
    })
}
