//! Command implementations
//!
//! Both categories are written as `impl Repository` blocks:
//!
//! - `plumbing`: One external invocation each (rev-parse, cat-file, ls-tree, ...)
//! - `porcelain`: Workflows composed from plumbing (commit, log)
//!
//! Plumbing commands provide building blocks, while porcelain commands compose
//! them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
