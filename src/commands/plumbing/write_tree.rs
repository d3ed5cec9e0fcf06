use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::plumbing::last_object_id;
use crate::errors::Result;
use tracing::debug;

impl Repository {
    /// Write the staged index as a tree object and return its id
    pub async fn write_tree(&self) -> Result<ObjectId> {
        let lines = self
            .git("write-tree", Vec::<String>::new(), ExecOptions::default())
            .finish_lines()
            .await?;
        let tree = last_object_id("write-tree", &lines)?;

        debug!(tree = %tree, "wrote tree");
        Ok(tree)
    }
}
