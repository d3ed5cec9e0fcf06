//! Working tree status as reported by the external tool
//!
//! Status is taken from machine-readable porcelain lines, where the
//! two-character code occupies positions 0-1 and the path begins at
//! position 3.

pub mod status_code;
