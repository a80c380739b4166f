//! .gitignore file parser

use crate::core::error::{CollectorError, Result};
use crate::core::types::IgnoreRule;
use std::fs;
use std::path::Path;

/// Name of the per-directory rule file
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Parse .gitignore content into rules, keeping declaration order
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// Everything else is taken verbatim as a pattern.
pub fn parse_content(content: &str, source: &str) -> Vec<IgnoreRule> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| IgnoreRule::new(line, source))
        .collect()
}

/// Read and parse a .gitignore file
pub fn parse_file(path: &Path) -> Result<Vec<IgnoreRule>> {
    let content =
        fs::read_to_string(path).map_err(|e| CollectorError::file_read(path.to_path_buf(), e))?;
    Ok(parse_content(&content, &path.to_string_lossy()))
}

/// Parse the .gitignore in `dir`, if there is one
pub fn parse_directory(dir: &Path) -> Result<Option<Vec<IgnoreRule>>> {
    let gitignore = dir.join(GITIGNORE_FILE_NAME);
    if !gitignore.is_file() {
        return Ok(None);
    }
    parse_file(&gitignore).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_patterns() {
        let content = r#"
# Comments are ignored
*.tmp
   build/
node_modules

  # indented comment
"#;

        let rules = parse_content(content, "/repo/.gitignore");
        let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();

        assert_eq!(patterns, vec!["*.tmp", "build/", "node_modules"]);
        assert!(rules.iter().all(|r| r.source == "/repo/.gitignore"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let rules = parse_content("a.txt\r\nb.txt\r\n", ".gitignore");
        let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_negation_is_a_plain_pattern() {
        let rules = parse_content("!keep.log\n", ".gitignore");
        assert_eq!(rules[0].pattern, "!keep.log");
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let gitignore = temp_dir.path().join(GITIGNORE_FILE_NAME);
        fs::write(&gitignore, "*.tmp\nbuild/\n")?;

        let rules = parse_file(&gitignore)?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].source, gitignore.to_string_lossy());

        Ok(())
    }

    #[test]
    fn test_parse_directory_without_gitignore() -> Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(parse_directory(temp_dir.path())?.is_none());

        fs::write(temp_dir.path().join(GITIGNORE_FILE_NAME), "# only a comment\n")?;
        assert_eq!(parse_directory(temp_dir.path())?, Some(Vec::new()));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = parse_file(Path::new("/definitely/not/here/.gitignore")).unwrap_err();
        assert!(matches!(err, CollectorError::FileRead { .. }));
    }
}
