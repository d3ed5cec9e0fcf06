use crate::areas::repository::Repository;
use crate::artifacts::apps::content::HistoricalContent;
use crate::artifacts::apps::entry_point::{EntryPoint, Origin};
use crate::artifacts::apps::live::LiveApp;
use crate::artifacts::apps::metadata::AppMetadata;
use crate::artifacts::apps::{VIEWS_DIR, ViewLocation};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;
use tracing::debug;

/// Full or abbreviated commit id as accepted in URLs
static REVISION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{4,40}$").expect("revision regex is valid"));

/// A project as it was at one committed revision
///
/// Everything reachable from here is immutable, so whatever gets loaded is
/// kept for the lifetime of the instance. Nothing here reads from or writes
/// to the working copy.
#[derive(Debug)]
pub struct VersionedApp {
    name: String,
    revision: String,
    commit: Commit,
    repository: Repository,
    entry_point_path: String,
    metadata_file: String,
    entry_point: OnceCell<Arc<EntryPoint>>,
}

impl VersionedApp {
    /// Resolve `revision` of the project behind `live` to its commit and tree
    pub async fn load(
        live: &LiveApp,
        revision: &str,
        entry_point_path: &str,
        metadata_file: &str,
    ) -> Result<Self> {
        if !REVISION_REGEX.is_match(revision) {
            return Err(VcsError::not_found(format!("revision {:?}", revision)));
        }

        let repository = live.repository().clone();
        let commit_oid = repository
            .rev_parse(&format!("{revision}^{{commit}}"))
            .await?;
        let commit = repository.parse_commit(&commit_oid).await?;
        debug!(app = live.name(), revision, tree = %commit.tree_oid(), "resolved revision");

        Ok(VersionedApp {
            name: live.name().to_string(),
            revision: revision.to_string(),
            commit,
            repository,
            entry_point_path: entry_point_path.to_string(),
            metadata_file: metadata_file.to_string(),
            entry_point: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The revision string this instance was requested with
    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn tree_oid(&self) -> &ObjectId {
        self.commit.tree_oid()
    }

    pub async fn resolve_metadata(&self) -> Result<AppMetadata> {
        match self.content(&self.metadata_file).await {
            Ok(content) => Ok(AppMetadata::from_json(&self.name, &content.bytes)),
            Err(error) if error.is_not_found() => Ok(AppMetadata::defaults_for(&self.name)),
            Err(error) => Err(error),
        }
    }

    /// Entry point as committed at this revision, loaded at most once
    pub async fn load_entry_point(&self) -> Result<Arc<EntryPoint>> {
        let entry_point = self
            .entry_point
            .get_or_try_init(|| async {
                let content = self.content(&self.entry_point_path).await?;
                debug!(app = %self.name, revision = %self.revision, "loaded versioned entry point");

                Ok::<_, VcsError>(Arc::new(EntryPoint::new(
                    self.entry_point_path.as_str(),
                    Origin::Revision(self.commit.oid().clone()),
                    content.bytes,
                )))
            })
            .await?;

        Ok(entry_point.clone())
    }

    /// Content of any file at this revision
    pub async fn content(&self, path: &str) -> Result<HistoricalContent> {
        let entry = self.repository.find_blob(self.tree_oid(), path).await?;
        let bytes = self.repository.cat_file(&entry.oid, entry.kind).await?;

        Ok(HistoricalContent::new(path, bytes))
    }

    pub fn view_path(&self, view: &str) -> ViewLocation {
        ViewLocation::Tree {
            tree: self.tree_oid().clone(),
            path: format!("{VIEWS_DIR}/{view}.html"),
        }
    }
}
