//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (malformed tree file)
pub const DATAERR: i32 = 65;

/// Cannot open input (tree file missing)
pub const NOINPUT: i32 = 66;

/// Service unavailable (tree could not be loaded)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
