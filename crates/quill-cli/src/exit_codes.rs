//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - an output does not match its golden file
pub const ERROR: i32 = 1;

/// Template error - rendering failed (cycle, depth limit, unknown include)
pub const TEMPLATE_ERROR: i32 = 3;

/// Document error - the template document or config could not be loaded
pub const DOCUMENT_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
