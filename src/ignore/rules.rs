//! Layered ignore rules: configuration rules plus nested .gitignore files
//!
//! All matching is rooted at the traversal root. A rule from
//! `sub/.gitignore` is tested against `sub/file.txt`, not `file.txt`.

use crate::core::error::{CollectorError, Result};
use crate::core::types::IgnoreRule;
use crate::ignore::parser;
use crate::ignore::pattern::GlobPattern;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered rules from the configuration, built once per run
#[derive(Debug, Clone, Default)]
pub struct GlobalRuleSet {
    rules: Vec<IgnoreRule>,
}

impl GlobalRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration patterns; empty patterns are dropped
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !pattern.is_empty() {
                set.push(IgnoreRule::from_config(pattern));
            }
        }
        set
    }

    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A rule whose pattern compiled successfully
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: IgnoreRule,
    pattern: GlobPattern,
}

/// A rule that could not be compiled and therefore never matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFailure {
    pub rule: IgnoreRule,
    pub reason: String,
}

/// Answers "is this path ignored" for one run
///
/// `.gitignore` files are read the first time their directory is on a
/// lookup's path-to-root chain and cached for the lifetime of this value.
#[derive(Debug)]
pub struct IgnoreRuleSet {
    global: Vec<CompiledRule>,
    directory_rules: DashMap<PathBuf, Arc<Vec<CompiledRule>>>,
    failures: Mutex<Vec<PatternFailure>>,
}

impl IgnoreRuleSet {
    /// Compile the global rules
    pub fn new(global: GlobalRuleSet) -> Self {
        let failures = Mutex::new(Vec::new());
        let global = compile_rules(global.rules, &failures);
        Self {
            global,
            directory_rules: DashMap::new(),
            failures,
        }
    }

    /// Whether `path` is excluded when walking `root`
    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        self.matching_rule(path, root).is_some()
    }

    /// The first rule that ignores `path`, if any
    pub fn matching_rule(&self, path: &Path, root: &Path) -> Option<IgnoreRule> {
        let relative = match relative_slash_path(path, root) {
            Ok(relative) => relative,
            Err(e) => {
                warn!("{}; treating as not ignored", e);
                return None;
            },
        };

        // The root itself is never ignored
        if relative.is_empty() {
            return None;
        }

        let candidates = candidate_paths(&relative);

        if let Some(rule) = self.global.iter().find(|r| r.matches_any(&candidates)) {
            debug!(
                "Path {} matched global ignore rule {}",
                relative, rule.rule.pattern
            );
            return Some(rule.rule.clone());
        }

        let mut current = path.parent();
        while let Some(dir) = current {
            let rules = self.rules_for_directory(dir);
            if let Some(rule) = rules.iter().find(|r| r.matches_any(&candidates)) {
                debug!(
                    "Path {} matched .gitignore rule {} from {}",
                    relative, rule.rule.pattern, rule.rule.source
                );
                return Some(rule.rule.clone());
            }

            if dir == root {
                break;
            }
            current = dir.parent();
        }

        None
    }

    /// Global rules in declaration order
    pub fn global_rules(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.global.iter().map(|r| &r.rule)
    }

    /// Patterns that failed to compile so far
    pub fn pattern_failures(&self) -> Vec<PatternFailure> {
        self.failures.lock().clone()
    }

    /// Number of directories whose .gitignore state has been loaded
    pub fn cached_directories(&self) -> usize {
        self.directory_rules.len()
    }

    fn rules_for_directory(&self, dir: &Path) -> Arc<Vec<CompiledRule>> {
        if let Some(rules) = self.directory_rules.get(dir) {
            return Arc::clone(rules.value());
        }

        let entry = self
            .directory_rules
            .entry(dir.to_path_buf())
            .or_insert_with(|| Arc::new(self.load_directory_rules(dir)));
        Arc::clone(entry.value())
    }

    fn load_directory_rules(&self, dir: &Path) -> Vec<CompiledRule> {
        match parser::parse_directory(dir) {
            Ok(Some(rules)) => {
                debug!(
                    "Loaded {} rules from .gitignore in {}",
                    rules.len(),
                    dir.display()
                );
                compile_rules(rules, &self.failures)
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error parsing .gitignore in {}: {}", dir.display(), e);
                Vec::new()
            },
        }
    }
}

fn compile_rules(rules: Vec<IgnoreRule>, failures: &Mutex<Vec<PatternFailure>>) -> Vec<CompiledRule> {
    let mut compiled = Vec::with_capacity(rules.len());
    for rule in rules {
        match GlobPattern::compile(&rule.pattern) {
            Ok(pattern) => compiled.push(CompiledRule { rule, pattern }),
            Err(e) => {
                warn!("Error compiling pattern from {}: {}", rule.source, e);
                failures.lock().push(PatternFailure {
                    rule,
                    reason: e.to_string(),
                });
            },
        }
    }
    compiled
}

impl CompiledRule {
    fn matches_any(&self, candidates: &[String]) -> bool {
        candidates.iter().any(|c| self.pattern.is_match(c))
    }
}

/// Express `path` relative to `root` with '/' separators
pub fn relative_slash_path(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| CollectorError::path_resolution(path.to_path_buf(), root.to_path_buf()))?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}

/// Every sub-path a pattern is tested against for one relative path
///
/// For `a/b/c` this is the prefixes `a`, `a/b`, `a/b/c`, the ancestor
/// prefixes with a trailing slash `a/`, `a/b/`, and the single segments
/// `b`, `c`. A path's candidates always include those of its ancestors, so
/// anything beneath an ignored directory is ignored too.
pub fn candidate_paths(relative: &str) -> Vec<String> {
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    let mut candidates = Vec::with_capacity(segments.len() * 3);

    let mut prefix = String::with_capacity(relative.len());
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            prefix.push('/');
        }
        prefix.push_str(segment);
        candidates.push(prefix.clone());
        if i + 1 < segments.len() {
            candidates.push(format!("{}/", prefix));
        }
    }

    candidates.extend(segments.iter().skip(1).map(|s| s.to_string()));
    candidates
}

/// Whether `pattern` matches any candidate sub-path of `relative`
pub fn matches_any_part(pattern: &GlobPattern, relative: &str) -> bool {
    candidate_paths(relative)
        .iter()
        .any(|candidate| pattern.is_match(candidate))
}
