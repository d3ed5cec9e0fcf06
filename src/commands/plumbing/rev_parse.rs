use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::plumbing::last_object_id;
use crate::errors::{Result, VcsError};

/// Exit status of `rev-parse --verify --quiet` for an unknown revision
const NO_MATCH_STATUS: i32 = 1;

impl Repository {
    /// Resolve a symbolic or relative revision to an object id
    ///
    /// Unresolvable revisions (including HEAD before the first commit) are
    /// [`VcsError::NotFound`].
    pub async fn rev_parse(&self, rev: &str) -> Result<ObjectId> {
        if rev.is_empty() || rev.starts_with('-') {
            return Err(VcsError::not_found(format!("revision {:?}", rev)));
        }

        let outcome = self
            .git("rev-parse", ["--verify", "--quiet", rev], ExecOptions::default())
            .finish_lines()
            .await;

        match outcome {
            Ok(lines) => last_object_id("rev-parse", &lines),
            // --quiet exits with status 1 and no fatal line when nothing matches
            Err(VcsError::Process {
                status: Some(NO_MATCH_STATUS),
                message: None,
                ..
            }) => {
                Err(VcsError::not_found(format!("revision {:?}", rev)))
            }
            Err(error) => Err(error),
        }
    }
}
