//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They are
//! content-addressed: the same id always names the same bytes, so an id is
//! opaque and never mutated once parsed.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc123d")
//! - Null: 40 zeros, used as "must not exist yet" in ref updates

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Result, VcsError};
use std::str::FromStr;

/// Object identifier
///
/// Only constructed through [`ObjectId::try_parse`], so every value in
/// circulation is a well-formed lowercase 40-hex id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character lowercase hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or a parse error if invalid length/characters
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(VcsError::parse(
                "object id",
                format!("invalid length {} for {:?}", id.len(), id),
            ));
        }
        if !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(VcsError::parse(
                "object id",
                format!("invalid characters in {:?}", id),
            ));
        }
        Ok(Self(id))
    }

    /// The all-zero id
    pub fn null() -> Self {
        Self("0".repeat(OBJECT_ID_LENGTH))
    }

    pub fn is_null(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl FromStr for ObjectId {
    type Err = VcsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
