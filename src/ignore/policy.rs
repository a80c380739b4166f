//! Inclusion policy: extension allow-list combined with ignore rules

use crate::ignore::parser::GITIGNORE_FILE_NAME;
use crate::ignore::rules::IgnoreRuleSet;
use std::path::Path;
use tracing::debug;

/// Decides which files are collected and which directories are walked
#[derive(Debug)]
pub struct InclusionPolicy {
    extensions: Vec<String>,
    rules: IgnoreRuleSet,
}

impl InclusionPolicy {
    /// An empty `extensions` list disables the extension filter
    pub fn new(extensions: Vec<String>, rules: IgnoreRuleSet) -> Self {
        Self { extensions, rules }
    }

    /// Whether a regular file's content should be collected
    pub fn is_included(&self, path: &Path, root: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        // Rule files feed the ignore engine, they are not content
        if name == GITIGNORE_FILE_NAME {
            return false;
        }

        if !self.extensions.is_empty() {
            let allowed = match extension_of(&name) {
                Some(ext) => self.extensions.iter().any(|e| e == ext),
                None => false,
            };
            if !allowed {
                debug!("File not included by extension: {}", path.display());
                return false;
            }
        }

        !self.rules.is_ignored(path, root)
    }

    /// Whether a directory is pruned from the walk
    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        self.rules.is_ignored(path, root)
    }

    pub fn rules(&self) -> &IgnoreRuleSet {
        &self.rules
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Extension of a file name including its dot: the suffix from the last `.`
///
/// `main.go` gives `.go`, `.gitignore` gives `.gitignore`, `Makefile` gives
/// nothing.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[i..])
}
