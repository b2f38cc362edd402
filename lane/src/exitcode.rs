//! Exit codes

/// Successful termination (also help, version and engine failures)
pub const OK: i32 = 0;

/// Missing keywords or invalid url
pub const INVALID_INPUT: i32 = 1;

/// Configuration file could not be read or parsed (BSD sysexits.h EX_CONFIG)
pub const CONFIG: i32 = 78;
