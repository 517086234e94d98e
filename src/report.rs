//! # Report Module
//!
//! This module records what happened to every target file during a run and
//! can write the result as a JSON report.
//!
//! The [`RunSummary`] it produces also decides the exit status: a run
//! "changed" something if any file was rewritten, or would have been
//! rewritten in check mode.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::{Map, Value, json, to_string_pretty};

/// Why a file was not processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// The path matched an exclude pattern.
  Excluded,
  /// Include patterns were given and none matched the path.
  NotIncluded,
  /// No comment style is known for the file's extension.
  UnsupportedExtension,
  /// The path is missing or is not a regular file.
  NotAFile,
  /// The file could not be read as UTF-8 text.
  Unreadable(String),
  /// The new content could not be written back.
  WriteFailed(String),
}

impl SkipReason {
  /// Short machine-readable identifier used in reports.
  pub const fn code(&self) -> &'static str {
    match self {
      Self::Excluded => "excluded",
      Self::NotIncluded => "not_included",
      Self::UnsupportedExtension => "unsupported_extension",
      Self::NotAFile => "not_a_file",
      Self::Unreadable(_) => "unreadable",
      Self::WriteFailed(_) => "write_failed",
    }
  }
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Excluded => write!(f, "matches an exclude pattern"),
      Self::NotIncluded => write!(f, "matches no include pattern"),
      Self::UnsupportedExtension => write!(f, "unsupported file extension"),
      Self::NotAFile => write!(f, "not a regular file"),
      Self::Unreadable(message) => write!(f, "unreadable: {message}"),
      Self::WriteFailed(message) => write!(f, "write failed: {message}"),
    }
  }
}

/// The result of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
  /// The file already had the expected header layout. It was not touched.
  Unchanged,
  /// The file was rewritten with the expected header.
  Rewritten,
  /// Check mode: the file would have been rewritten.
  NeedsRewrite,
  /// The file was not processed.
  Skipped(SkipReason),
}

impl FileOutcome {
  /// Whether this outcome counts as a change for the exit status.
  pub const fn is_change(&self) -> bool {
    matches!(self, Self::Rewritten | Self::NeedsRewrite)
  }

  /// Short machine-readable identifier used in reports.
  pub const fn code(&self) -> &'static str {
    match self {
      Self::Unchanged => "unchanged",
      Self::Rewritten => "rewritten",
      Self::NeedsRewrite => "needs_rewrite",
      Self::Skipped(_) => "skipped",
    }
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  /// Path to the file, as given on the command line
  pub path: PathBuf,
  /// What happened to the file
  pub outcome: FileOutcome,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
    Self {
      path: path.into(),
      outcome,
    }
  }
}

/// Summary of a run: one report per target, in input order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
  /// Per-file reports
  pub files: Vec<FileReport>,
  /// Total processing time
  pub processing_time: Duration,
}

impl RunSummary {
  /// Create a summary from a collection of reports.
  pub const fn new(files: Vec<FileReport>, processing_time: Duration) -> Self {
    Self { files, processing_time }
  }

  /// Total number of target paths.
  pub fn total_files(&self) -> usize {
    self.files.len()
  }

  fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
    self.files.iter().filter(|file| predicate(&file.outcome)).count()
  }

  pub fn rewritten(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Rewritten))
  }

  pub fn needs_rewrite(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::NeedsRewrite))
  }

  pub fn unchanged(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Unchanged))
  }

  pub fn skipped(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Skipped(_)))
  }

  /// Whether any file was rewritten or would be rewritten.
  pub fn any_changed(&self) -> bool {
    self.files.iter().any(|file| file.outcome.is_change())
  }

  /// Paths of the files that were (or would be) rewritten.
  pub fn changed_files(&self) -> impl Iterator<Item = &Path> {
    self
      .files
      .iter()
      .filter(|file| file.outcome.is_change())
      .map(|file| file.path.as_path())
  }

  /// Reports of the files that were skipped.
  pub fn skipped_files(&self) -> impl Iterator<Item = (&Path, &SkipReason)> {
    self.files.iter().filter_map(|file| match &file.outcome {
      FileOutcome::Skipped(reason) => Some((file.path.as_path(), reason)),
      _ => None,
    })
  }
}

/// Writes a [`RunSummary`] as a JSON report.
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Create a new report generator
  ///
  /// # Parameters
  ///
  /// * `output_path` - The path where the report will be saved
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Generate the report and write it to disk.
  ///
  /// # Returns
  ///
  /// `Ok(())` if the report was written, or an error if it couldn't be
  /// serialized or written to disk.
  pub fn generate(&self, summary: &RunSummary) -> Result<()> {
    let content = render_json(summary)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}

/// Renders the JSON report content.
pub fn render_json(summary: &RunSummary) -> Result<String> {
  let mut files_array = Vec::new();
  for file in &summary.files {
    let mut file_map = Map::new();
    file_map.insert(
      "path".to_string(),
      Value::String(file.path.to_string_lossy().to_string()),
    );
    file_map.insert("outcome".to_string(), Value::String(file.outcome.code().to_string()));

    if let FileOutcome::Skipped(reason) = &file.outcome {
      file_map.insert("skip_reason".to_string(), Value::String(reason.code().to_string()));
      file_map.insert("detail".to_string(), Value::String(reason.to_string()));
    }

    files_array.push(Value::Object(file_map));
  }

  let mut summary_map = Map::new();
  summary_map.insert("total_files".to_string(), Value::Number(summary.total_files().into()));
  summary_map.insert("rewritten".to_string(), Value::Number(summary.rewritten().into()));
  summary_map.insert("needs_rewrite".to_string(), Value::Number(summary.needs_rewrite().into()));
  summary_map.insert("unchanged".to_string(), Value::Number(summary.unchanged().into()));
  summary_map.insert("skipped".to_string(), Value::Number(summary.skipped().into()));
  summary_map.insert("any_changed".to_string(), Value::Bool(summary.any_changed()));
  summary_map.insert(
    "processing_time_seconds".to_string(),
    serde_json::Number::from_f64(summary.processing_time.as_secs_f64()).map_or(Value::Null, Value::Number),
  );

  let report = json!({
      "generated_at": Local::now().to_rfc3339(),
      "summary": summary_map,
      "files": files_array
  });

  Ok(to_string_pretty(&report)?)
}
