//! Indented text rendering of the directory structure

use crate::collect::pipeline::EntryKind;
use crate::core::error::Result;
use crate::ignore::policy::InclusionPolicy;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Renders the non-ignored part of a directory tree as indented text
pub struct TreeRenderer<'a> {
    policy: &'a InclusionPolicy,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(policy: &'a InclusionPolicy) -> Self {
        Self { policy }
    }

    /// Render the tree under `root`
    ///
    /// A walk error replaces the whole listing with a one-line report, so the
    /// returned string is never empty.
    pub fn render(&self, root: &Path) -> String {
        info!("Generating tree for {}", root.display());
        match self.try_render(root) {
            Ok(tree) => {
                info!("Tree generation complete");
                tree
            },
            Err(e) => {
                warn!("Error generating tree: {}", e);
                format!("Error generating tree: {}", e)
            },
        }
    }

    /// Render the tree, surfacing walk errors
    ///
    /// Entries are visited in file-name order. Indentation is two spaces per
    /// separator in the root-relative path, so the root line and its direct
    /// children share the left margin.
    pub fn try_render(&self, root: &Path) -> Result<String> {
        let mut output = String::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && self.policy.is_ignored(entry.path(), root))
            });

        for entry in walker {
            let entry = entry?;
            let indent = "  ".repeat(entry.depth().saturating_sub(1));
            let name = entry.file_name().to_string_lossy();

            match EntryKind::of(&entry) {
                EntryKind::Dir => output.push_str(&format!("{}{}/\n", indent, name)),
                EntryKind::File if self.policy.is_included(entry.path(), root) => {
                    output.push_str(&format!("{}{}\n", indent, name))
                },
                EntryKind::File => debug!("Not included in tree: {}", entry.path().display()),
                EntryKind::Other => debug!("Not a regular file: {}", entry.path().display()),
            }
        }

        Ok(output)
    }
}
