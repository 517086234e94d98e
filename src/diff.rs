//! # Diff Module
//!
//! This module contains functionality for creating and rendering diffs between original and modified content.
//! It's used to show what a header rewrite changes in a file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines shown around each change.
const CONTEXT_RADIUS: usize = 3;

/// Manages diff creation and rendering for license header changes.
///
/// This struct handles:
/// - Generating unified diffs between original and modified content
/// - Displaying diffs to stderr with colorization
/// - Appending diffs to a file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to show diffs on stderr
  pub show_diff: bool,

  /// Path to append diffs to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager with the specified configuration.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to show diffs on stderr
  /// * `save_diff_path` - Path to append diffs to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  ///
  /// # Errors
  ///
  /// Returns an error if the diff file cannot be created.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      std::fs::write(diff_path, "").with_context(|| format!("Failed to create diff file {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Displays and/or saves a diff between the original and new content.
  ///
  /// If show_diff is enabled, the diff is printed to stderr with
  /// colorization. If save_diff_path is set, the uncolored diff is appended
  /// to that file, so diffs of several files end up in one patch.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file being processed
  /// * `original` - Original file content
  /// * `new` - New file content with license header
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let diff_content = unified_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        eprintln!("{}", colorize_line(line));
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a unified diff with `a/` and `b/` headers.
pub fn unified_diff(path: &Path, original: &str, new: &str) -> String {
  let display = path.display().to_string();
  let diff = TextDiff::from_lines(original, new);

  diff
    .unified_diff()
    .context_radius(CONTEXT_RADIUS)
    .header(&format!("a/{display}"), &format!("b/{display}"))
    .to_string()
}

/// Counts inserted and deleted lines between two texts.
pub fn change_counts(original: &str, new: &str) -> (usize, usize) {
  let diff = TextDiff::from_lines(original, new);
  diff
    .iter_all_changes()
    .fold((0, 0), |(inserted, deleted), change| match change.tag() {
      ChangeTag::Insert => (inserted + 1, deleted),
      ChangeTag::Delete => (inserted, deleted + 1),
      ChangeTag::Equal => (inserted, deleted),
    })
}

fn colorize_line(line: &str) -> String {
  if line.starts_with("+++") || line.starts_with("---") {
    line.if_supports_color(Stream::Stderr, |l| l.bold()).to_string()
  } else if line.starts_with('+') {
    line.if_supports_color(Stream::Stderr, |l| l.green()).to_string()
  } else if line.starts_with('-') {
    line.if_supports_color(Stream::Stderr, |l| l.red()).to_string()
  } else if line.starts_with("@@") {
    line.if_supports_color(Stream::Stderr, |l| l.cyan()).to_string()
  } else {
    line.to_string()
  }
}
