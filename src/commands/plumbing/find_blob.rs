use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{TreeEntry, path_components};
use crate::errors::{Result, VcsError};
use tracing::debug;

impl Repository {
    /// Resolve a slash-separated `path` inside `tree` to its leaf entry
    ///
    /// Walks one tree level per component. Fails with NotFound when a
    /// component is missing, when a non-final component is not a tree, or
    /// when the final component is itself a tree.
    pub async fn find_blob(&self, tree: &ObjectId, path: &str) -> Result<TreeEntry> {
        let components = path_components(path);
        let Some((leaf, dirs)) = components.split_last() else {
            return Err(VcsError::not_found(format!("empty path in tree {tree}")));
        };

        let mut current = tree.clone();
        for (depth, dir) in dirs.iter().enumerate() {
            let entry = self.ls_tree(&current).await?.get(dir).cloned();
            match entry {
                Some(entry) if entry.is_tree() => current = entry.oid,
                _ => {
                    return Err(VcsError::not_found(format!(
                        "directory {} in tree {tree}",
                        components[..=depth].join("/")
                    )));
                }
            }
        }

        let entry = self.ls_tree(&current).await?.get(leaf).cloned();
        match entry {
            Some(entry) if !entry.is_tree() => {
                debug!(tree = %tree, path, blob = %entry.oid, "resolved path");
                Ok(entry)
            }
            _ => Err(VcsError::not_found(format!(
                "file {} in tree {tree}",
                components.join("/")
            ))),
        }
    }
}
