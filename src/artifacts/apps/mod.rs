//! Projects as loadable applications
//!
//! A project is served either from its live working copy or from a committed
//! revision. Both variants answer the same three questions (metadata, entry
//! point, where views live) and are dispatched explicitly through
//! [`Application`].
//!
//! - `live`: The working copy, with an invalidatable entry-point cache
//! - `versioned`: One immutable revision, cached forever
//! - `metadata`: `meta.json` decoding with defaults
//! - `entry_point`: A loaded entry-point unit
//! - `content`: Historical file content and content types

pub mod content;
pub mod entry_point;
pub mod live;
pub mod metadata;
pub mod versioned;

use crate::artifacts::apps::entry_point::EntryPoint;
use crate::artifacts::apps::live::LiveApp;
use crate::artifacts::apps::metadata::AppMetadata;
use crate::artifacts::apps::versioned::VersionedApp;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Directory holding view templates, relative to a project root
pub const VIEWS_DIR: &str = "views";

/// Where a view template can be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLocation {
    /// A file in the working copy
    Disk(PathBuf),
    /// A path inside a committed tree
    Tree { tree: ObjectId, path: String },
}

#[derive(Debug, Clone)]
pub enum Application {
    Live(Arc<LiveApp>),
    Versioned(Arc<VersionedApp>),
}

impl Application {
    pub fn name(&self) -> &str {
        match self {
            Application::Live(app) => app.name(),
            Application::Versioned(app) => app.name(),
        }
    }

    pub async fn resolve_metadata(&self) -> Result<AppMetadata> {
        match self {
            Application::Live(app) => app.resolve_metadata().await,
            Application::Versioned(app) => app.resolve_metadata().await,
        }
    }

    pub async fn load_entry_point(&self) -> Result<Arc<EntryPoint>> {
        match self {
            Application::Live(app) => app.load_entry_point().await,
            Application::Versioned(app) => app.load_entry_point().await,
        }
    }

    pub fn view_path(&self, view: &str) -> ViewLocation {
        match self {
            Application::Live(app) => app.view_path(view),
            Application::Versioned(app) => app.view_path(view),
        }
    }
}
