use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::errors::Result;

impl Repository {
    /// Stage the entire working tree, including deletions
    pub async fn add_all(&self) -> Result<()> {
        self.git("add", ["--all", ":/"], ExecOptions::default())
            .finish()
            .await?;

        Ok(())
    }
}
