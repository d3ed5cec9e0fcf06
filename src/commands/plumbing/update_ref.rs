use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};
use tracing::{debug, warn};

/// Fragment of the fatal line printed when the old-value check fails
const LOCK_REJECTED: &str = "cannot lock ref";

impl Repository {
    /// Point `name` at `new_value`
    ///
    /// With `expected` set the update is a compare-and-swap: if the ref's
    /// current value is not `expected` it is left untouched and
    /// [`VcsError::ConcurrentUpdate`] is returned. The null id as `expected`
    /// means the ref must not exist yet.
    pub async fn update_ref(
        &self,
        name: &str,
        new_value: &ObjectId,
        expected: Option<&ObjectId>,
    ) -> Result<()> {
        let mut args = vec![name.to_string(), new_value.to_string()];
        if let Some(expected) = expected {
            args.push(expected.to_string());
        }

        let outcome = self
            .git("update-ref", args, ExecOptions::default())
            .finish()
            .await;

        match (outcome, expected) {
            (Ok(_), _) => {
                debug!(reference = name, value = %new_value, "updated ref");
                Ok(())
            }
            (Err(error), Some(expected))
                if error
                    .fatal_message()
                    .is_some_and(|message| message.contains(LOCK_REJECTED)) =>
            {
                warn!(reference = name, expected = %expected, "ref update rejected");
                Err(VcsError::ConcurrentUpdate {
                    reference: name.to_string(),
                    expected: expected.clone(),
                })
            }
            (Err(error), _) => Err(error),
        }
    }
}
