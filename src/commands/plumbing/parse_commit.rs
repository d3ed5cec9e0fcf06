use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;

impl Repository {
    /// Read a commit object and decode it
    pub async fn parse_commit(&self, oid: &ObjectId) -> Result<Commit> {
        let raw = self.cat_file(oid, ObjectType::Commit).await?;

        Commit::parse(oid.clone(), &raw)
    }
}
