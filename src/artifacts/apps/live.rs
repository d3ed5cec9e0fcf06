use crate::areas::executor::Executor;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::apps::entry_point::{EntryPoint, Origin};
use crate::artifacts::apps::metadata::AppMetadata;
use crate::artifacts::apps::{VIEWS_DIR, ViewLocation};
use crate::config::StoreConfig;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::sync::Mutex;
use tracing::debug;

static PROJECT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("project name regex is valid"));

/// The current, editable state of a project
///
/// Its loaded entry point is cached until [`LiveApp::invalidate`] is called,
/// which must happen whenever the working copy is edited.
#[derive(Debug)]
pub struct LiveApp {
    name: String,
    repository: Repository,
    workspace: Workspace,
    entry_point_path: String,
    metadata_file: String,
    entry_point: Mutex<Option<Arc<EntryPoint>>>,
}

impl LiveApp {
    /// Open the project `name` under the configured projects directory
    pub fn open(name: &str, config: &StoreConfig) -> Result<Self> {
        if !PROJECT_NAME_REGEX.is_match(name) {
            return Err(VcsError::not_found(format!("project {:?}", name)));
        }

        let root = config.apps_dir.join(name);
        if !root.is_dir() {
            return Err(VcsError::not_found(format!("project {:?}", name)));
        }

        let repository = Repository::open(&root, Executor::new(&config.git_binary))?;
        let workspace = Workspace::new(repository.path().into());

        Ok(LiveApp {
            name: name.to_string(),
            repository,
            workspace,
            entry_point_path: config.entry_point.clone(),
            metadata_file: config.metadata_file.clone(),
            entry_point: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub async fn resolve_metadata(&self) -> Result<AppMetadata> {
        match self.workspace.read_file(&self.metadata_file).await {
            Ok(raw) => Ok(AppMetadata::from_json(&self.name, &raw)),
            Err(error) if error.is_not_found() => Ok(AppMetadata::defaults_for(&self.name)),
            Err(error) => Err(error),
        }
    }

    /// Entry point as it is in the working copy, loaded once until invalidated
    pub async fn load_entry_point(&self) -> Result<Arc<EntryPoint>> {
        let mut cached = self.entry_point.lock().await;
        if let Some(entry_point) = cached.as_ref() {
            return Ok(entry_point.clone());
        }

        let source = self.workspace.read_file(&self.entry_point_path).await?;
        let entry_point = Arc::new(EntryPoint::new(
            self.entry_point_path.as_str(),
            Origin::WorkingCopy,
            source,
        ));
        debug!(app = %self.name, path = %self.entry_point_path, "loaded live entry point");

        *cached = Some(entry_point.clone());
        Ok(entry_point)
    }

    /// Drop the cached entry point; returns whether one was cached
    pub async fn invalidate(&self) -> bool {
        let dropped = self.entry_point.lock().await.take().is_some();
        debug!(app = %self.name, dropped, "invalidated live entry point");
        dropped
    }

    pub fn view_path(&self, view: &str) -> ViewLocation {
        ViewLocation::Disk(
            self.workspace
                .path()
                .join(VIEWS_DIR)
                .join(format!("{view}.html")),
        )
    }

    pub async fn read_file(&self, path: &str) -> Result<Bytes> {
        self.workspace.read_file(path).await
    }

    /// Write to the working copy without touching any cache
    pub async fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        self.workspace.write_file(path, content).await
    }
}
