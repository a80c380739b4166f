//! Plain-text report rendering

use crate::core::types::TraversalResult;

const SEPARATOR_WIDTH: usize = 80;

/// Report header, the tree, then every file followed by a dashed separator
pub fn render(result: &TraversalResult) -> String {
    let mut output = String::new();
    output.push_str("Code Collection Report\n\n");
    output.push_str("Directory Structure:\n\n");
    output.push_str(&result.tree);
    output.push('\n');

    let separator = "-".repeat(SEPARATOR_WIDTH);
    for file in &result.files {
        output.push_str(&format!("File: {}\n\n", file.relative_path));
        output.push_str("Content:\n\n");
        output.push_str(&file.content_lossy());
        output.push_str("\n\n");
        output.push_str(&separator);
        output.push_str("\n\n");
    }

    output
}
