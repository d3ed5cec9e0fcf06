use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::identity::CommitIdentities;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::plumbing::last_object_id;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use derive_new::new;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Input for [`Repository::commit_tree`]
#[derive(Debug, Clone, new)]
pub struct CommitTreeParams {
    pub tree: ObjectId,
    /// Sent over stdin, so any length and any embedded newlines are fine
    #[new(into)]
    pub message: Bytes,
    /// Ordered; the first one is the primary lineage
    #[new(default)]
    pub parents: Vec<ObjectId>,
    #[new(default)]
    pub identities: CommitIdentities,
}

impl CommitTreeParams {
    pub fn parents(mut self, parents: impl IntoIterator<Item = ObjectId>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    pub fn identities(mut self, identities: CommitIdentities) -> Self {
        self.identities = identities;
        self
    }
}

impl Repository {
    /// Create a commit object and return its id
    ///
    /// Identity overrides are passed through the process environment only.
    pub async fn commit_tree(&self, params: CommitTreeParams) -> Result<ObjectId> {
        let mut args = vec![params.tree.to_string()];
        for parent in &params.parents {
            args.push("-p".to_string());
            args.push(parent.to_string());
        }

        let options = ExecOptions::default().envs(params.identities.to_env());
        let mut process = self.git("commit-tree", args, options);

        let stdin = process.take_stdin();
        let message = params.message.clone();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            let written = async {
                stdin.write_all(&message).await?;
                stdin.shutdown().await
            };
            match written.await {
                // the process died early; its completion carries the reason
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                other => other.map_err(VcsError::from),
            }
        };

        let ((), lines) = tokio::try_join!(feed, process.finish_lines())?;
        let commit = last_object_id("commit-tree", &lines)?;

        debug!(commit = %commit, tree = %params.tree, parents = params.parents.len(), "created commit object");
        Ok(commit)
    }
}
