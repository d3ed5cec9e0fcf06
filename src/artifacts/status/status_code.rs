use crate::errors::{Result, VcsError};
use colored::Colorize;
use std::collections::BTreeMap;

/// Relative path → two-character status code
pub type StatusMap = BTreeMap<String, StatusCode>;

/// Two-character porcelain status code, e.g. `" M"`, `"A "` or `"??"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode([char; 2]);

impl StatusCode {
    /// Column describing the index (staged) side
    pub fn index(&self) -> char {
        self.0[0]
    }

    /// Column describing the working tree side
    pub fn worktree(&self) -> char {
        self.0[1]
    }

    pub fn is_untracked(&self) -> bool {
        self.0 == ['?', '?']
    }

    pub fn is_staged(&self) -> bool {
        !matches!(self.index(), ' ' | '?' | '!')
    }

    /// Renames and copies are followed by the path they came from
    pub fn has_source_path(&self) -> bool {
        matches!(self.index(), 'R' | 'C') || matches!(self.worktree(), 'R' | 'C')
    }

    /// Render the code with staged changes in green and unstaged ones in red
    pub fn colored(&self) -> String {
        format!(
            "{}{}",
            self.index().to_string().green(),
            self.worktree().to_string().red()
        )
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

/// Split one NUL-terminated porcelain record into its path and code
pub fn parse_porcelain_entry(line: &str) -> Result<(String, StatusCode)> {
    let mut chars = line.chars();
    let (Some(index), Some(worktree), Some(' ')) = (chars.next(), chars.next(), chars.next()) else {
        return Err(VcsError::parse("status line", format!("{:?}", line)));
    };

    let path = chars.as_str();
    if path.is_empty() {
        return Err(VcsError::parse("status line", format!("{:?} has no path", line)));
    }

    Ok((path.to_string(), StatusCode([index, worktree])))
}
