//! Per-project building blocks
//!
//! - `executor`: Launches the external tool and reports its completion
//! - `repository`: A project's repository and the entry point for commands
//! - `refs`: HEAD resolution
//! - `workspace`: Working copy file reads and writes
//! - `registry`: Projects by name, with their live and versioned caches

pub mod executor;
pub(crate) mod refs;
pub mod registry;
pub mod repository;
pub mod workspace;
