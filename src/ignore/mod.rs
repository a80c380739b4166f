//! Gitignore-style exclusion rules
//!
//! Rules come from the configuration and from `.gitignore` files found on the
//! way from a path up to the traversal root. A path is ignored when any rule
//! matches any of its sub-paths; there is no negation and no precedence.

pub mod parser;
pub mod pattern;
pub mod policy;
pub mod rules;

// Re-export commonly used items
pub use pattern::{matches, GlobPattern};
pub use policy::InclusionPolicy;
pub use rules::{GlobalRuleSet, IgnoreRuleSet, PatternFailure};
