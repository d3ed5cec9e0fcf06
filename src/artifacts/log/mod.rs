//! Commit history traversal
//!
//! - `rev_list`: First-parent walk from a starting commit

pub mod rev_list;
