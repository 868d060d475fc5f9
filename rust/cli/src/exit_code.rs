//! Exit code constants for the CLI application.
//!
//! Every command maps its outcome onto one of these, so scripts can rely on
//! a fixed contract.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, invalid configuration, engine errors.
pub const ERROR: i32 = 2;
