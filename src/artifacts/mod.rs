//! Data structures read from and built on top of repositories
//!
//! - `apps`: Live and versioned project applications
//! - `log`: Commit history traversal
//! - `objects`: Object ids, commits, trees and identities
//! - `status`: Working tree status codes

pub mod apps;
pub mod log;
pub mod objects;
pub mod status;
