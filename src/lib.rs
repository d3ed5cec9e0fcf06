//! Version-control-backed content store for editor projects
//!
//! Every project is a directory under the configured projects directory,
//! holding its own repository. All repository work is delegated to the
//! external `git` executable, one subprocess per operation.
//!
//! - `areas`: Process executor, repositories, working copies and the registry
//! - `artifacts`: Typed objects, history, status and project applications
//! - `commands`: Plumbing and porcelain operations on a repository
//! - `config`: Store configuration
//! - `errors`: The shared error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

pub use areas::registry::AppRegistry;
pub use areas::repository::Repository;
pub use config::StoreConfig;
pub use errors::{Result, VcsError};
