//! Glob pattern translation for ignore rules
//!
//! Patterns are a restricted glob over `/`-separated paths. They are
//! translated to a regular expression once and then matched many times:
//!
//! - `**` on its own matches every path
//! - `**` (or `**/`) matches zero or more leading directories: `(?:.*/)?`
//! - `*` matches within one segment: `[^/]*`
//! - `?` matches exactly one non-separator character
//! - everything else matches literally
//!
//! Anchoring is decided per end: a pattern is anchored at the start unless it
//! starts with `*`, and at the end unless it ends with `*`. So `*.go` means
//! "ends with `.go`" while `foo*` still has to start with `foo`.

use crate::core::error::{CollectorError, Result};
use regex::{Regex, RegexBuilder};

/// Longest pattern accepted, in bytes
pub const MAX_PATTERN_LEN: usize = 4096;

/// Upper bound on the compiled size of a single pattern
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// A compiled ignore pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    original: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// The bare `**` pattern
    Everything,
    Regex(Regex),
}

impl GlobPattern {
    /// Compile a pattern into a reusable matcher
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern == "**" {
            return Ok(Self {
                original: pattern.to_string(),
                matcher: Matcher::Everything,
            });
        }

        if pattern.len() > MAX_PATTERN_LEN {
            return Err(CollectorError::pattern(
                pattern,
                format!("pattern is longer than {} bytes", MAX_PATTERN_LEN),
            ));
        }

        let regex = RegexBuilder::new(&translate(pattern))
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| CollectorError::pattern(pattern, e.to_string()))?;

        Ok(Self {
            original: pattern.to_string(),
            matcher: Matcher::Regex(regex),
        })
    }

    /// Test a '/'-separated candidate path
    pub fn is_match(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Regex(regex) => regex.is_match(candidate),
        }
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

/// Compile `pattern` and test it against `candidate` in one step
pub fn matches(pattern: &str, candidate: &str) -> Result<bool> {
    Ok(GlobPattern::compile(pattern)?.is_match(candidate))
}

/// Translate a glob pattern into regular expression source
pub fn translate(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() * 2 + 2);
    if !pattern.starts_with('*') {
        source.push('^');
    }

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                // "**/" is one token: the slash belongs to the optional group
                if chars.peek() == Some(&'/') {
                    chars.next();
                }
                source.push_str("(?:.*/)?");
            },
            '*' => source.push_str("[^/]*"),
            '?' => source.push_str("[^/]"),
            literal => {
                let mut buf = [0u8; 4];
                source.push_str(&regex::escape(literal.encode_utf8(&mut buf)));
            },
        }
    }

    if !pattern.ends_with('*') {
        source.push('$');
    }
    source
}
