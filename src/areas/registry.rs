//! Project registry
//!
//! Owns the configuration and both application caches. Live apps are keyed
//! by project name and their entry point is invalidated on every save made
//! through the registry. Versioned apps are keyed by (project, revision) and
//! never invalidated: the content behind a commit id cannot change.
//!
//! Cache locks are never held while a repository is being queried. Two
//! concurrent misses for the same key may both load; the first insert wins
//! and both callers get that instance.

use crate::artifacts::apps::Application;
use crate::artifacts::apps::content::HistoricalContent;
use crate::artifacts::apps::live::LiveApp;
use crate::artifacts::apps::versioned::VersionedApp;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::identity::CommitIdentities;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_code::StatusMap;
use crate::config::StoreConfig;
use crate::errors::Result;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

type VersionKey = (String, String);

#[derive(Debug)]
pub struct AppRegistry {
    config: StoreConfig,
    live: Mutex<HashMap<String, Arc<LiveApp>>>,
    versions: Mutex<HashMap<VersionKey, Arc<VersionedApp>>>,
}

impl AppRegistry {
    pub fn new(config: StoreConfig) -> Self {
        AppRegistry {
            config,
            live: Mutex::new(HashMap::new()),
            versions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The working-copy application of `name`
    pub async fn live(&self, name: &str) -> Result<Arc<LiveApp>> {
        if let Some(app) = self.live.lock().await.get(name) {
            return Ok(app.clone());
        }

        let app = Arc::new(LiveApp::open(name, &self.config)?);
        let mut live = self.live.lock().await;
        Ok(live.entry(name.to_string()).or_insert(app).clone())
    }

    /// The application of `name` as committed at `revision`
    pub async fn versioned(&self, name: &str, revision: &str) -> Result<Arc<VersionedApp>> {
        let key = (name.to_string(), revision.to_string());
        if let Some(app) = self.versions.lock().await.get(&key) {
            return Ok(app.clone());
        }

        let live = self.live(name).await?;
        let app = Arc::new(
            VersionedApp::load(
                &live,
                revision,
                &self.config.entry_point,
                &self.config.metadata_file,
            )
            .await?,
        );
        debug!(app = name, revision, "cached versioned app");

        let mut versions = self.versions.lock().await;
        Ok(versions.entry(key).or_insert(app).clone())
    }

    /// Live or versioned application depending on whether a revision is given
    pub async fn application(&self, name: &str, revision: Option<&str>) -> Result<Application> {
        match revision {
            None => Ok(Application::Live(self.live(name).await?)),
            Some(revision) => Ok(Application::Versioned(self.versioned(name, revision).await?)),
        }
    }

    /// Write a file into the working copy, then drop the live entry point
    ///
    /// Versioned apps of the same project are left untouched.
    pub async fn save_file(&self, name: &str, path: &str, content: &[u8]) -> Result<()> {
        let app = self.live(name).await?;
        app.write_file(path, content).await?;
        self.invalidate(name).await;

        Ok(())
    }

    /// Drop the live entry point of `name`, if one is loaded
    pub async fn invalidate(&self, name: &str) -> bool {
        let app = self.live.lock().await.get(name).cloned();
        match app {
            Some(app) => app.invalidate().await,
            None => false,
        }
    }

    pub async fn read_file(&self, name: &str, path: &str) -> Result<Bytes> {
        self.live(name).await?.read_file(path).await
    }

    pub async fn status(&self, name: &str) -> Result<StatusMap> {
        self.live(name).await?.repository().status().await
    }

    pub async fn history(&self, name: &str) -> Result<Vec<Commit>> {
        self.live(name).await?.repository().history().await
    }

    /// Stage everything in the working copy and commit it
    pub async fn commit(
        &self,
        name: &str,
        message: impl Into<Bytes>,
        identities: CommitIdentities,
    ) -> Result<ObjectId> {
        let app = self.live(name).await?;
        let repository = app.repository();

        repository.add_all().await?;
        let commit = repository.commit(message, identities).await?;
        info!(app = name, commit = %commit.to_short_oid(), "committed snapshot");

        Ok(commit)
    }

    /// Bytes and content type of `path` as committed at `revision`
    pub async fn resolve_historical_content(
        &self,
        name: &str,
        revision: &str,
        path: &str,
    ) -> Result<HistoricalContent> {
        self.versioned(name, revision).await?.content(path).await
    }
}
