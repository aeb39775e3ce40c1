//! Stable exit codes for coursework binaries.

/// Command succeeded, or every verified test case passed.
pub const OK: i32 = 0;
/// Invalid input, usage, metadata or config.
pub const INVALID: i32 = 1;
/// `coursework verify` found at least one failing test case.
pub const FAILED: i32 = 2;
