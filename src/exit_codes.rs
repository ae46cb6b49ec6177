//! Exit codes for the installer binary
//!
//! The installer is interactive and rerunnable, so every failure that
//! aborts an install or uninstall collapses to a single error code.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Privilege failure, invalid input, or an unrecoverable step failure
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable internal error
pub const EXIT_PANIC: i32 = 101;
