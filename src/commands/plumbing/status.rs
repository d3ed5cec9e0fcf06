use crate::areas::executor::ExecOptions;
use crate::areas::repository::Repository;
use crate::artifacts::status::status_code::{StatusMap, parse_porcelain_entry};
use crate::errors::{Result, VcsError};
use tracing::debug;

impl Repository {
    /// Map of relative path → status code for the working tree
    ///
    /// Records are NUL-terminated so paths arrive unquoted. Renames and
    /// copies are keyed by their new path.
    pub async fn status(&self) -> Result<StatusMap> {
        let output = self
            .git("status", ["--porcelain", "-z"], ExecOptions::default())
            .finish()
            .await?;
        let text = std::str::from_utf8(&output)
            .map_err(|e| VcsError::parse("status output", e.to_string()))?;

        let mut statuses = StatusMap::new();
        let mut records = text.split('\0').filter(|record| !record.is_empty());
        while let Some(record) = records.next() {
            let (path, code) = parse_porcelain_entry(record)?;
            if code.has_source_path() {
                records.next();
            }
            statuses.insert(path, code);
        }

        debug!(repository = %self.path().display(), entries = statuses.len(), "status");

        Ok(statuses)
    }
}
