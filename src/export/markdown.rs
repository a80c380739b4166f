//! Markdown report rendering

use crate::core::types::TraversalResult;
use crate::ignore::policy::extension_of;

const FALLBACK_LANGUAGE: &str = "plaintext";

/// Headings plus fenced blocks for the tree and every file
pub fn render(result: &TraversalResult) -> String {
    let mut output = String::new();
    output.push_str("# Code Collection Report\n\n");

    output.push_str("## Directory Structure\n\n");
    output.push_str("```plaintext\n");
    output.push_str(&result.tree);
    output.push_str("```\n\n");

    output.push_str("## File Contents\n\n");
    for file in &result.files {
        output.push_str(&format!("### {}\n\n", file.relative_path));
        output.push_str(&format!("```{}\n", fence_language(&file.relative_path)));
        output.push_str(&file.content_lossy());
        output.push_str("\n```\n\n");
    }

    output
}

/// Info string for a fenced block holding `path`
pub fn fence_language(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);

    match name {
        "Dockerfile" => return "dockerfile",
        "Makefile" | "GNUmakefile" => return "makefile",
        "CMakeLists.txt" => return "cmake",
        _ => {},
    }

    let ext = match extension_of(name) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return FALLBACK_LANGUAGE,
    };

    match ext.as_str() {
        ".go" => "go",
        ".rs" => "rust",
        ".py" | ".pyi" => "python",
        ".js" | ".mjs" | ".cjs" => "javascript",
        ".jsx" => "jsx",
        ".ts" => "typescript",
        ".tsx" => "tsx",
        ".java" => "java",
        ".kt" | ".kts" => "kotlin",
        ".scala" => "scala",
        ".swift" => "swift",
        ".c" | ".h" => "c",
        ".cc" | ".cpp" | ".cxx" | ".hpp" | ".hh" => "cpp",
        ".cs" => "csharp",
        ".rb" => "ruby",
        ".php" => "php",
        ".lua" => "lua",
        ".pl" => "perl",
        ".sh" | ".bash" | ".zsh" => "bash",
        ".ps1" => "powershell",
        ".sql" => "sql",
        ".html" | ".htm" => "html",
        ".css" => "css",
        ".scss" => "scss",
        ".xml" => "xml",
        ".json" => "json",
        ".yaml" | ".yml" => "yaml",
        ".toml" => "toml",
        ".ini" | ".cfg" => "ini",
        ".md" | ".markdown" => "markdown",
        ".proto" => "protobuf",
        ".ex" | ".exs" => "elixir",
        ".erl" => "erlang",
        ".hs" => "haskell",
        ".dart" => "dart",
        ".vue" => "vue",
        _ => FALLBACK_LANGUAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FileRecord;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("main.go", "go")]
    #[case("src/lib.rs", "rust")]
    #[case("scripts/build.SH", "bash")]
    #[case("web/app.tsx", "tsx")]
    #[case("docker/Dockerfile", "dockerfile")]
    #[case("Makefile", "makefile")]
    #[case("LICENSE", "plaintext")]
    #[case("data.unknownext", "plaintext")]
    fn test_fence_language(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(fence_language(path), expected);
    }

    #[test]
    fn test_markdown_report() {
        let result = TraversalResult::new(
            "root/\nmain.go\n".to_string(),
            vec![FileRecord::new("main.go", b"package main".to_vec())],
        );

        let expected = "# Code Collection Report\n\n\
                        ## Directory Structure\n\n```plaintext\nroot/\nmain.go\n```\n\n\
                        ## File Contents\n\n### main.go\n\n```go\npackage main\n```\n\n";
        assert_eq!(render(&result), expected);
    }
}
