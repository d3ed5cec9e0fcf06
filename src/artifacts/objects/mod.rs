//! Object types as the content store sees them
//!
//! Every object is immutable and identified by a 40-hex content hash:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, types and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! Objects are only read here, through their textual plumbing representation;
//! they are written by the external tool.

pub mod commit;
pub mod identity;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
