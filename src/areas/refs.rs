//! References
//!
//! A reference is a named, mutable pointer to a commit id. The only one this
//! crate moves is HEAD, and only through a compare-and-swap
//! (`Repository::update_ref` with an expected old value).

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

impl Repository {
    /// Current value of HEAD, or None if nothing has been committed yet
    pub async fn read_head(&self) -> Result<Option<ObjectId>> {
        match self.rev_parse(HEAD_REF_NAME).await {
            Ok(oid) => Ok(Some(oid)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }
}
