//! Porcelain commands (composed workflows)
//!
//! Porcelain commands compose plumbing commands into multi-step workflows.
//! Each runs its steps strictly in order and aborts on the first failure.
//!
//! ## Commands
//!
//! - `commit`: Record the staged index as the next commit on HEAD
//! - `log`: Materialize the first-parent history of HEAD

pub mod commit;
pub mod log;
