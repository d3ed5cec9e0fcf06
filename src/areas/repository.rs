use crate::areas::executor::{ExecOptions, Executor, GitProcess};
use crate::errors::{Result, VcsError};
use std::ffi::OsString;
use std::path::Path;

/// A project's on-disk repository, driven through the external tool
///
/// Cheap to clone. Plumbing operations live in `commands::plumbing` and the
/// composed workflows in `commands::porcelain`, each as `impl Repository`.
/// No locking happens here: concurrent writers are serialized by the
/// external tool's own lock files, and lost updates are prevented only by
/// the compare-and-swap in `update_ref`.
#[derive(Debug, Clone)]
pub struct Repository {
    path: Box<Path>,
    executor: Executor,
}

impl Repository {
    pub fn open(path: &Path, executor: Executor) -> Result<Self> {
        let path = path
            .canonicalize()
            .map_err(|_| VcsError::not_found(format!("repository at {}", path.display())))?;

        if !path.is_dir() {
            return Err(VcsError::not_found(format!(
                "repository at {}",
                path.display()
            )));
        }

        Ok(Repository {
            path: path.into_boxed_path(),
            executor,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Spawn a command in this repository unless `options` says otherwise
    pub fn git<I, S>(&self, command: &str, args: I, options: ExecOptions) -> GitProcess
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let options = if options.has_cwd() {
            options
        } else {
            options.cwd(&*self.path)
        };

        self.executor.spawn(command, args, options)
    }
}
