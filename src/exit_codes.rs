//! # Exit Codes
//!
//! Exit codes of the license-header-hook binary. Pre-commit treats any
//! non-zero status as a failed hook, so a run that rewrote files fails and
//! the user re-stages the changes.

/// No file was rewritten (or would be rewritten in check mode)
pub const EXIT_SUCCESS: u8 = 0;

/// At least one file was rewritten, or needs a rewrite in check mode
pub const EXIT_FILES_CHANGED: u8 = 1;

/// Configuration error (missing template, invalid config, bad pattern)
pub const EXIT_CONFIG_ERROR: u8 = 2;
