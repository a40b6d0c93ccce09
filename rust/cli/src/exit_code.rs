//! Process exit codes returned by [`crate::run`].

/// The command finished normally.
pub const SUCCESS: i32 = 0;

/// Usage, configuration, I/O or game error.
pub const ERROR: i32 = 2;

/// Stopped by the user (Ctrl+C) or by a test break point.
pub const INTERRUPTED: i32 = 130;
