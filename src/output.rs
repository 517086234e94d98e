//! # Output Module
//!
//! This module centralizes all user-facing output for license-header-hook.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show which files were touched without requiring flags
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: In quiet mode only the changed paths are printed

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{RunSummary, SkipReason};

/// Symbols used in output
pub mod symbols {
  /// Success/header present
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header missing or outdated
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Ignored/skipped
  pub const IGNORED: &str = "-";
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Processing" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the files that were rewritten, or that need a rewrite in check mode.
///
/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files unless verbose mode is on.
/// In quiet mode only the paths are printed, one per line.
pub fn print_changed_files(files: &[&Path], workspace_root: Option<&Path>, check_only: bool) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files = files.to_vec();
  sorted_files.sort();

  if is_quiet() {
    for file in &sorted_files {
      println!("{}", make_relative_path(file, workspace_root));
    }
    return;
  }

  let count = sorted_files.len();
  let header = if check_only {
    format!(
      "{} {} {} missing or outdated license headers:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      count,
      plural(count)
    )
  } else {
    format!(
      "{} Updated license header in {} {}:",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      count,
      plural(count)
    )
  };
  println!("{}", header);

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    println!("  {}", make_relative_path(file, workspace_root));
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print skipped files with their reasons. Only shown in verbose mode.
pub fn print_skipped_files<'a>(files: impl IntoIterator<Item = (&'a Path, &'a SkipReason)>, workspace_root: Option<&Path>) {
  if !is_verbose() {
    return;
  }

  for (path, reason) in files {
    println!(
      "  {} {}",
      symbols::IGNORED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      format!("{} (skipped: {})", make_relative_path(path, workspace_root), reason)
        .if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the success message when no file needed a change.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have up-to-date license headers.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y rewritten, Z skipped"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &RunSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let (changed_label, changed_count) = if check_only {
    ("need update", summary.needs_rewrite())
  } else {
    ("rewritten", summary.rewritten())
  };

  let ok_str = summary.unchanged().if_supports_color(Stream::Stdout, |s| s.cyan()).to_string();
  let changed_str = if changed_count > 0 {
    changed_count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    changed_count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let skipped_str = summary.skipped().if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string();

  let mut summary_line = format!(
    "Summary: {} OK, {} {}, {} skipped",
    ok_str, changed_str, changed_label, skipped_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the workspace root for display.
pub fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  if let Some(root) = workspace_root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(&root)), "src/main.rs");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let path = PathBuf::from("/elsewhere/main.rs");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(&root)), "/elsewhere/main.rs");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");

    assert_eq!(make_relative_path(&path, None), "/workspace/project/src/main.rs");
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(1), "file");
    assert_eq!(plural(0), "files");
    assert_eq!(plural(2), "files");
  }
}
