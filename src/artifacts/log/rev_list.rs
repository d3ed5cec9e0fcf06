use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;

/// First-parent walk starting at `start_commit`
#[derive(Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start_commit: ObjectId,
}

impl RevList<'_> {
    /// Walk to the root commit and return every commit, newest first
    ///
    /// The list is fully materialized before it is returned. The first
    /// commit that cannot be read or parsed aborts the walk and nothing
    /// collected so far is returned.
    pub async fn collect(self) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        let mut current_commit_oid = Some(self.start_commit);

        while let Some(commit_oid) = current_commit_oid {
            let commit = self.repository.parse_commit(&commit_oid).await?;

            // Move to the parent commit for the next iteration
            current_commit_oid = commit.parent().cloned();
            commits.push(commit);
        }

        Ok(commits)
    }
}
