//! CLI command implementations

pub mod collect;
