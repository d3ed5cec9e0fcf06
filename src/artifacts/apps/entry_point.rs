use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// Where an entry point's source was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The live, possibly uncommitted, working copy
    WorkingCopy,
    /// An immutable committed revision
    Revision(ObjectId),
}

/// A project's entry-point source, loaded as one self-contained unit
///
/// Instances are never mutated: a reload produces a new one, so anything
/// still holding an old instance keeps running the code it loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    path: String,
    origin: Origin,
    source: Bytes,
}

impl EntryPoint {
    pub(crate) fn new(path: impl Into<String>, origin: Origin, source: Bytes) -> Self {
        EntryPoint {
            path: path.into(),
            origin,
            source,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn source(&self) -> &Bytes {
        &self.source
    }

    pub fn source_text(&self) -> String {
        String::from_utf8_lossy(&self.source).into_owned()
    }
}
