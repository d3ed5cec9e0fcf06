use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;

impl Repository {
    /// List a single level of a tree
    pub async fn ls_tree(&self, tree: &ObjectId) -> Result<Tree> {
        let listing = self
            .git("ls-tree", ["-z", tree.as_ref()], ExecOptions::default())
            .finish()
            .await?;

        Tree::parse_listing(&listing)
    }
}
