//! Plumbing commands (low-level object store operations)
//!
//! Each command is a single invocation of the external tool with a typed
//! input and output. They are the building blocks for the porcelain
//! commands and are exposed as-is to callers that need them.
//!
//! ## Commands
//!
//! - `status`: Path → two-character status code
//! - `add_all`: Stage the entire working tree
//! - `write_tree`: Write the index as a tree object
//! - `commit_tree`: Create a commit object from a tree
//! - `update_ref`: Compare-and-swap a reference
//! - `rev_parse`: Resolve a revision to an object id
//! - `cat_file`: Read an object's content
//! - `ls_tree`: List one level of a tree
//! - `find_blob`: Resolve a path inside a tree
//! - `parse_commit`: Read and decode a commit object

pub mod add_all;
pub mod cat_file;
pub mod commit_tree;
pub mod find_blob;
pub mod ls_tree;
pub mod parse_commit;
pub mod rev_parse;
pub mod status;
pub mod update_ref;
pub mod write_tree;

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};

/// Take the id printed on the last non-empty output line
pub(crate) fn last_object_id(command: &str, lines: &[String]) -> Result<ObjectId> {
    let line = lines
        .iter()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| VcsError::parse(format!("{command} output"), "no object id printed"))?;

    ObjectId::try_parse(line.trim())
}
