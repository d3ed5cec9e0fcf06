//! Error taxonomy for the content store
//!
//! Every plumbing and protocol operation surfaces one of these to its caller.
//! Nothing in this crate retries on error; in particular a
//! [`VcsError::ConcurrentUpdate`] must be handled by re-running the whole
//! commit sequence from the top.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Message reported when a command exits non-zero without a `fatal: ` line
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Tail of the fatal line printed when another process holds a lock file
const LOCK_FILE_EXISTS: &str = ".lock': File exists";

#[derive(Debug, Error)]
pub enum VcsError {
    /// A ref, object, tree path, project or revision does not exist
    #[error("{what} not found")]
    NotFound { what: String },

    /// An object did not match the expected textual grammar
    #[error("malformed {object}: {reason}")]
    Parse { object: String, reason: String },

    /// The external tool ran but exited with a non-zero status
    #[error("{command} failed: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Process {
        command: String,
        status: Option<i32>,
        /// The first `fatal: ` line of standard error, verbatim
        message: Option<String>,
    },

    /// A compare-and-swap ref update observed a different current value
    #[error("ref {reference} was updated concurrently (expected {expected})")]
    ConcurrentUpdate {
        reference: String,
        expected: ObjectId,
    },

    /// The external tool could not be launched at all
    #[error("failed to launch {command}: {source}")]
    Transport {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl VcsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        VcsError::NotFound { what: what.into() }
    }

    pub fn parse(object: impl Into<String>, reason: impl Into<String>) -> Self {
        VcsError::Parse {
            object: object.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, VcsError::NotFound { .. })
    }

    pub fn is_concurrent_update(&self) -> bool {
        matches!(self, VcsError::ConcurrentUpdate { .. })
    }

    /// Whether the tool gave up because another process held a `*.lock` file
    pub fn is_lock_contention(&self) -> bool {
        self.fatal_message()
            .is_some_and(|message| message.contains(LOCK_FILE_EXISTS))
    }

    /// The captured `fatal: ` line, if this is a process failure that had one
    pub fn fatal_message(&self) -> Option<&str> {
        match self {
            VcsError::Process { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VcsError>;
