//! Tree object listings
//!
//! Trees are directory snapshots: a mapping from a single path component to
//! an entry that points at a blob (file) or a nested tree. Trees are only
//! ever expanded one level at a time, as `ls-tree -z` prints them:
//!
//! ```text
//! <mode> SP <type> SP <object>\t<name>\0
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, VcsError};
use std::collections::BTreeMap;

/// One named entry of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub mode: String,
    pub kind: ObjectType,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Parse a single NUL-terminated record of `ls-tree -z` output
    pub fn parse(record: &str) -> Result<Self> {
        let malformed = || VcsError::parse("tree entry", format!("{:?}", record));

        let (meta, name) = record.split_once('\t').ok_or_else(malformed)?;
        let mut fields = meta.split(' ');
        let (Some(mode), Some(kind), Some(oid), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        Ok(TreeEntry {
            name: name.to_string(),
            mode: mode.to_string(),
            kind: ObjectType::try_from(kind)?,
            oid: ObjectId::try_parse(oid)?,
        })
    }

    pub fn is_tree(&self) -> bool {
        self.kind == ObjectType::Tree
    }
}

/// A single level of a tree, keyed by entry name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Parse the full `ls-tree -z` output of one tree
    pub fn parse_listing(listing: &[u8]) -> Result<Self> {
        let listing = std::str::from_utf8(listing)
            .map_err(|e| VcsError::parse("tree listing", e.to_string()))?;

        let entries = listing
            .split('\0')
            .filter(|record| !record.is_empty())
            .map(|record| TreeEntry::parse(record).map(|entry| (entry.name.clone(), entry)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Tree { entries })
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a slash-separated path into tree path components
///
/// The path is treated as rooted: empty and `.` components are dropped and
/// `..` never climbs above the root.
pub fn path_components(path: &str) -> Vec<&str> {
    path.split('/').fold(Vec::new(), |mut components, component| {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            name => components.push(name),
        }
        components
    })
}
