//! Store configuration
//!
//! Every field can be set on the command line or through an `APPVCS_*`
//! environment variable; library callers construct it directly.

use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_GIT_BINARY: &str = "git";
pub const DEFAULT_APPS_DIR: &str = "apps";
pub const DEFAULT_ENTRY_POINT: &str = "app/index.js";
pub const DEFAULT_METADATA_FILE: &str = "meta.json";

#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Version-control executable to run
    #[arg(long = "git", env = "APPVCS_GIT", default_value = DEFAULT_GIT_BINARY)]
    pub git_binary: PathBuf,

    /// Directory holding one repository per project
    #[arg(long, env = "APPVCS_APPS_DIR", default_value = DEFAULT_APPS_DIR)]
    pub apps_dir: PathBuf,

    /// Entry-point source path, relative to a project root
    #[arg(long, env = "APPVCS_ENTRY_POINT", default_value = DEFAULT_ENTRY_POINT)]
    pub entry_point: String,

    /// Metadata file path, relative to a project root
    #[arg(long, env = "APPVCS_METADATA_FILE", default_value = DEFAULT_METADATA_FILE)]
    pub metadata_file: String,
}

impl StoreConfig {
    /// Defaults for everything but the projects directory
    pub fn new(apps_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            git_binary: PathBuf::from(DEFAULT_GIT_BINARY),
            apps_dir: apps_dir.into(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
        }
    }

    pub fn with_git_binary(mut self, git_binary: impl Into<PathBuf>) -> Self {
        self.git_binary = git_binary.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_APPS_DIR)
    }
}
