//! Stable exit codes for flowrun commands.

/// Command succeeded (including the not-initialized notice).
pub const OK: i32 = 0;
/// Invalid input, bad configuration, or an I/O failure.
pub const INVALID: i32 = 1;
/// The flow's script ran and exited non-zero.
pub const SCRIPT_FAILED: i32 = 2;
