use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::identity::CommitIdentities;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::plumbing::commit_tree::CommitTreeParams;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use tracing::{debug, info, warn};

impl Repository {
    /// Record the staged index as a new commit on top of HEAD
    ///
    /// 1. resolve HEAD (no commits yet means no parent)
    /// 2. write the index as a tree
    /// 3. create the commit object
    /// 4. move HEAD, expecting the value read in step 1
    ///
    /// If another writer moved HEAD in between, or holds a lock file that
    /// steps 2 to 4 need, the commit fails with `ConcurrentUpdate` and HEAD
    /// keeps the other writer's value. An orphaned commit object is
    /// harmless; callers retry from step 1.
    pub async fn commit(
        &self,
        message: impl Into<Bytes>,
        identities: CommitIdentities,
    ) -> Result<ObjectId> {
        let parent = self.read_head().await?;
        debug!(parent = ?parent, "resolved HEAD");

        // the null id makes the very first commit a compare-and-swap too
        let expected = parent.clone().unwrap_or_else(ObjectId::null);

        let tree = self
            .write_tree()
            .await
            .map_err(|error| lock_contention(error, &expected))?;

        let params = CommitTreeParams::new(tree, message)
            .parents(parent.clone())
            .identities(identities);
        let commit = self
            .commit_tree(params)
            .await
            .map_err(|error| lock_contention(error, &expected))?;

        self.update_ref(HEAD_REF_NAME, &commit, Some(&expected))
            .await
            .map_err(|error| lock_contention(error, &expected))?;

        let is_root = if parent.is_none() { "(root-commit) " } else { "" };
        info!(
            repository = %self.path().display(),
            "[{}{}] committed",
            is_root,
            commit.to_short_oid()
        );

        Ok(commit)
    }
}

/// A lock file held by another writer means HEAD is being moved under us
fn lock_contention(error: VcsError, expected: &ObjectId) -> VcsError {
    if !error.is_lock_contention() {
        return error;
    }

    warn!(error = %error, "commit lost a lock race");
    VcsError::ConcurrentUpdate {
        reference: HEAD_REF_NAME.to_string(),
        expected: expected.clone(),
    }
}
