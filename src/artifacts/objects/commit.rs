//! Commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s), first parent being the primary lineage
//! - Author and committer information
//! - Commit message (arbitrary bytes)
//!
//! ## Format
//!
//! As printed by `cat-file commit <id>`:
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! Header lines are parsed strictly: anything other than these four shapes
//! before the first blank line is rejected.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, VcsError};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `<name> <<email>> <unix-seconds> <sign><hhmm>`
static SIGNATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<name>.*?) ?<(?<email>[^<>]*)> (?<seconds>-?\d+) (?<offset>[+-]\d{4})$")
        .expect("signature regex is valid")
});

/// Author or committer information
///
/// The timestamp is decoded as UTC seconds since the epoch. The timezone
/// offset is parsed and kept alongside, but it is never applied to the
/// decoded instant.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<Utc>,
    tz_offset: FixedOffset,
}

impl Author {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The offset recorded next to the timestamp
    pub fn tz_offset(&self) -> FixedOffset {
        self.tz_offset
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 UTC"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y UTC").to_string()
    }

    fn parse(value: &str) -> Result<Self> {
        let captures = SIGNATURE_REGEX
            .captures(value)
            .ok_or_else(|| VcsError::parse("signature", format!("unexpected shape {:?}", value)))?;

        let seconds = captures["seconds"]
            .parse::<i64>()
            .map_err(|e| VcsError::parse("signature", format!("invalid timestamp: {e}")))?;
        let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0)
            .ok_or_else(|| VcsError::parse("signature", format!("timestamp {seconds} out of range")))?;

        Ok(Author {
            name: captures["name"].to_string(),
            email: captures["email"].to_string(),
            timestamp,
            tz_offset: parse_tz_offset(&captures["offset"])?,
        })
    }
}

fn parse_tz_offset(raw: &str) -> Result<FixedOffset> {
    let (sign, digits) = raw.split_at(1);
    let hours = digits[..2].parse::<i32>().unwrap_or(0);
    let minutes = digits[2..].parse::<i32>().unwrap_or(0);
    let seconds = (hours * 3600 + minutes * 60) * if sign == "-" { -1 } else { 1 };

    FixedOffset::east_opt(seconds)
        .ok_or_else(|| VcsError::parse("signature", format!("timezone {raw} out of range")))
}

/// Commit object
///
/// Represents a snapshot of the project with metadata. Built only by
/// [`Commit::parse`] from the raw text of an existing object.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// The commit's own object ID
    oid: ObjectId,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs, in the order they appear in the object
    parents: Vec<ObjectId>,
    /// Author who wrote the changes
    author: Author,
    /// Committer who recorded the commit
    committer: Author,
    /// Commit message, verbatim
    message: Bytes,
}

impl Commit {
    /// Decode the raw text of a commit object
    ///
    /// # Arguments
    ///
    /// * `oid` - The id the object was read under
    /// * `raw` - Object content as printed by `cat-file commit`
    pub fn parse(oid: ObjectId, raw: &[u8]) -> Result<Self> {
        let (header, message) = match raw.windows(2).position(|w| w == b"\n\n") {
            Some(split) => (&raw[..split], &raw[split + 2..]),
            None => (raw.strip_suffix(b"\n").unwrap_or(raw), &raw[raw.len()..]),
        };
        let header = std::str::from_utf8(header)
            .map_err(|e| VcsError::parse("commit header", format!("{oid}: {e}")))?;

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in header.split('\n') {
            match line.split_once(' ') {
                Some(("tree", value)) => {
                    if tree_oid.is_some() {
                        return Err(VcsError::parse("commit header", format!("{oid}: duplicate tree line")));
                    }
                    tree_oid = Some(ObjectId::try_parse(value)?);
                }
                Some(("parent", value)) => parents.push(ObjectId::try_parse(value)?),
                Some(("author", value)) => author = Some(Author::parse(value)?),
                Some(("committer", value)) => committer = Some(Author::parse(value)?),
                _ => {
                    return Err(VcsError::parse(
                        "commit header",
                        format!("{oid}: unexpected line {:?}", line),
                    ));
                }
            }
        }

        let missing = |field: &str| VcsError::parse("commit header", format!("{oid}: missing {field} line"));

        Ok(Commit {
            tree_oid: tree_oid.ok_or_else(|| missing("tree"))?,
            parents,
            author: author.ok_or_else(|| missing("author"))?,
            committer: committer.ok_or_else(|| missing("committer"))?,
            message: Bytes::copy_from_slice(message),
            oid,
        })
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    /// Get the tree object ID
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the edge history traversal follows
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    /// Get the full commit message
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., a one-line log)
    pub fn short_message(&self) -> String {
        String::from_utf8_lossy(&self.message)
            .lines()
            .next()
            .unwrap_or("")
            .to_string()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.author.timestamp()
    }
}
