use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::errors::Result;
use tracing::debug;

impl Repository {
    /// Full first-parent history of HEAD, newest first
    ///
    /// HEAD must resolve; a project without commits is NotFound. Any failure
    /// along the chain fails the whole walk.
    pub async fn history(&self) -> Result<Vec<Commit>> {
        let head = self.rev_parse(HEAD_REF_NAME).await?;
        let commits = RevList::new(self, head).collect().await?;

        debug!(repository = %self.path().display(), commits = commits.len(), "walked history");
        Ok(commits)
    }
}
