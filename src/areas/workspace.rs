use crate::artifacts::objects::tree::path_components;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories that are never read or written through the workspace
const IGNORED_PATHS: [&str; 1] = [".git"];

/// Working copy of a project: plain file read/write under its root
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map a project-relative path onto the file system
    ///
    /// `..` cannot escape the root and the repository directory is off
    /// limits.
    fn resolve(&self, file_path: &str) -> Result<PathBuf> {
        let components = path_components(file_path);

        if components.is_empty() || components.iter().any(|c| IGNORED_PATHS.contains(c)) {
            return Err(VcsError::not_found(format!("file {:?}", file_path)));
        }

        Ok(components
            .iter()
            .fold(self.path.to_path_buf(), |path, component| path.join(component)))
    }

    pub async fn read_file(&self, file_path: &str) -> Result<Bytes> {
        let path = self.resolve(file_path)?;

        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(VcsError::not_found(format!("file {:?}", file_path)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a file, creating parent directories as needed
    pub async fn write_file(&self, file_path: &str, content: &[u8]) -> Result<()> {
        let path = self.resolve(file_path)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;

        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}
