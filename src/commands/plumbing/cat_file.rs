use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, VcsError};
use bytes::Bytes;

/// Fatal-line fragments meaning the object (of that type) is absent
const MISSING_OBJECT: [&str; 2] = ["Not a valid object name", "bad file"];

impl Repository {
    /// Raw content of an object, which must exist with type `expected`
    pub async fn cat_file(&self, oid: &ObjectId, expected: ObjectType) -> Result<Bytes> {
        let outcome = self
            .git(
                "cat-file",
                [expected.as_str(), oid.as_ref()],
                ExecOptions::default(),
            )
            .finish()
            .await;

        match outcome {
            Err(error)
                if error
                    .fatal_message()
                    .is_some_and(|m| MISSING_OBJECT.iter().any(|fragment| m.contains(fragment))) =>
            {
                Err(VcsError::not_found(format!("{expected} {oid}")))
            }
            other => other,
        }
    }

    /// Content of an object decoded as UTF-8 text
    pub async fn cat_file_text(&self, oid: &ObjectId, expected: ObjectType) -> Result<String> {
        let bytes = self.cat_file(oid, expected).await?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| VcsError::parse(format!("{expected} {oid}"), e.to_string()))
    }
}
