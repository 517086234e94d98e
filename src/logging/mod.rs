//! # Logging Module
//!
//! Console logging for license-header-hook. There are two channels:
//!
//! - `verbose_log!` and [`log_outcome`] write per-file detail to stderr, only
//!   with `-v`
//! - `info_log!` writes notices to stdout unless `-q` is given
//!
//! Diagnostics that are not meant for the user (timings, header diffs, why a
//! file was skipped) go through `tracing` instead; see [`init_tracing`].
//!
//! ```rust
//! use std::path::Path;
//!
//! use license_header_hook::logging::{log_outcome, set_verbose};
//! use license_header_hook::report::FileOutcome;
//! use license_header_hook::verbose_log;
//!
//! set_verbose();
//! verbose_log!("Using config from {}", ".license-header.toml");
//! log_outcome(Path::new("src/app.py"), &FileOutcome::Rewritten);
//! ```

mod modes;

use std::path::Path;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

use crate::output::symbols;
use crate::report::FileOutcome;

/// Prints a dimmed line to stderr when verbose mode is on.
///
/// Takes the same arguments as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            $crate::logging::print_verbose_log(&format!($($arg)*));
        }
    };
}

/// Prints a line to stdout unless quiet mode is on.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

#[doc(hidden)]
pub fn print_verbose_log(message: &str) {
  eprintln!("{}", message.if_supports_color(Stream::Stderr, |m| m.dimmed()));
}

#[doc(hidden)]
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

/// Logs what happened to one file, in verbose mode only.
///
/// Unchanged and skipped files are logged too, so `-v` shows every target of
/// the run in order.
pub fn log_outcome(path: &Path, outcome: &FileOutcome) {
  if !is_verbose() {
    return;
  }

  let line = match outcome {
    FileOutcome::Unchanged => format!("{} {}", symbols::SUCCESS, path.display()),
    FileOutcome::Rewritten => format!("{} {} (header rewritten)", symbols::UPDATED, path.display()),
    FileOutcome::NeedsRewrite => format!("{} {} (header missing or outdated)", symbols::FAILURE, path.display()),
    FileOutcome::Skipped(reason) => format!("{} {} (skipped: {})", symbols::IGNORED, path.display(), reason),
  };
  print_verbose_log(&line);
}
