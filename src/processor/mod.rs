//! # Processor Module
//!
//! This module drives a run over a list of target files: filtering, comment
//! style resolution, header application, and writing changed files back.
//!
//! The module is organized into two submodules:
//! - [`header_engine`] - Header detection, extraction, removal and composition
//! - [`file_io`] - File reading and writing operations
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules for each target path.

mod file_io;
pub mod header_engine;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
pub use file_io::FileIO;
pub use header_engine::{HeaderEngine, ParsedDocument};
use tracing::{debug, trace, warn};

use crate::comment_style::{CommentStyleResolver, StyleTable};
use crate::diff::{DiffManager, change_counts};
use crate::file_filter::{CompositeFilter, FileFilter, create_default_filter};
use crate::logging::log_outcome;
use crate::report::{FileOutcome, FileReport, RunSummary, SkipReason};
use crate::templates::{LicenseData, TemplateManager};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub template_manager: TemplateManager,
  pub license_data: LicenseData,
  pub resolver: Box<dyn CommentStyleResolver>,

  // Behavior flags
  pub check_only: bool,

  // Filtering
  pub include: Vec<String>,
  pub exclude: Vec<String>,

  // Optional components
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(template_manager, license_data)
  /// }
  /// ```
  pub fn new(template_manager: TemplateManager, license_data: LicenseData) -> Self {
    Self {
      template_manager,
      license_data,
      resolver: Box::new(StyleTable::builtin()),
      check_only: false,
      include: vec![],
      exclude: vec![],
      diff_manager: None,
    }
  }
}

/// Processor for applying license headers to a list of files.
///
/// The `Processor` is responsible for:
/// - Skipping files excluded by patterns, missing, or of unknown type
/// - Inserting or replacing the license header of every other file
/// - Leaving files that already have the expected header untouched
/// - Showing diffs of would-be changes
/// - Collecting a report entry for every target
pub struct Processor {
  /// Header engine holding the rendered header text
  engine: HeaderEngine,

  /// Resolver mapping each path to its comment style
  resolver: Box<dyn CommentStyleResolver>,

  /// File filter for determining which files to process
  file_filter: CompositeFilter,

  /// Whether to only check for headers without modifying files
  check_only: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// The template is rendered once here; every file of the run gets the same
  /// header text.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the include or exclude patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_filter = create_default_filter(&config.include, &config.exclude)?;

    let header_text = config.template_manager.render(&config.license_data);
    debug!("Rendered header text ({} lines)", header_text.lines().count());

    let diff_manager = config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None));

    Ok(Self {
      engine: HeaderEngine::new(header_text),
      resolver: config.resolver,
      file_filter,
      check_only: config.check_only,
      diff_manager,
    })
  }

  /// Processes every target path in the order given.
  ///
  /// Per-file problems never abort the run; they show up as skipped entries
  /// in the returned summary.
  pub fn process(&self, files: &[PathBuf]) -> RunSummary {
    let start = Instant::now();
    debug!("Processing {} files", files.len());

    let reports = files
      .iter()
      .map(|path| {
        let outcome = self.process_file(path);
        log_outcome(path, &outcome);
        FileReport::new(path.clone(), outcome)
      })
      .collect();

    let summary = RunSummary::new(reports, start.elapsed());
    debug!(
      "Processed {} files in {}ms",
      summary.total_files(),
      summary.processing_time.as_millis()
    );

    summary
  }

  /// Processes a single file and returns what happened to it.
  pub fn process_file(&self, path: &Path) -> FileOutcome {
    let filter_result = self.file_filter.should_process(path);
    if !filter_result.should_process {
      let reason = filter_result.reason.unwrap_or(SkipReason::NotAFile);
      trace!("Skipping: {} ({})", path.display(), reason);
      return FileOutcome::Skipped(reason);
    }

    let Some(style) = self.resolver.resolve(path) else {
      trace!("Skipping: {} (no comment style defined for extension)", path.display());
      return FileOutcome::Skipped(SkipReason::UnsupportedExtension);
    };

    let content = match FileIO::read_text(path) {
      Ok(content) => content,
      Err(e) => {
        warn!("Skipping unreadable file {}: {:#}", path.display(), e);
        return FileOutcome::Skipped(SkipReason::Unreadable(format!("{e:#}")));
      }
    };

    let new_content = match self.engine.apply(&content, &style) {
      Cow::Borrowed(_) => {
        trace!("{}: header already up to date", path.display());
        return FileOutcome::Unchanged;
      }
      Cow::Owned(new_content) => new_content,
    };

    let (inserted, deleted) = change_counts(&content, &new_content);
    debug!("{}: header differs (+{} -{} lines)", path.display(), inserted, deleted);

    if self.diff_manager.is_enabled()
      && let Err(e) = self.diff_manager.display_diff(path, &content, &new_content)
    {
      warn!("Failed to display diff for {}: {}", path.display(), e);
    }

    if self.check_only {
      return FileOutcome::NeedsRewrite;
    }

    match FileIO::write_text(path, &new_content) {
      Ok(()) => FileOutcome::Rewritten,
      Err(e) => {
        warn!("Failed to write {}: {:#}", path.display(), e);
        FileOutcome::Skipped(SkipReason::WriteFailed(format!("{e:#}")))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;
  use crate::comment_style::CommentStyle;

  const TEMPLATE: &str = "Copyright (c) {year} {copyright_holder}\nLicense text here";

  fn license_data() -> LicenseData {
    LicenseData {
      year: "2025".to_string(),
      copyright_holder: "Test Corp".to_string(),
    }
  }

  fn processor(check_only: bool) -> Processor {
    Processor::new(ProcessorConfig {
      check_only,
      ..ProcessorConfig::new(TemplateManager::from_text(TEMPLATE), license_data())
    })
    .expect("processor should build")
  }

  #[test]
  fn test_rewrites_missing_header() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");
    fs::write(&path, "print('x')\n").expect("write file");

    assert_eq!(processor(false).process_file(&path), FileOutcome::Rewritten);
    assert_eq!(
      fs::read_to_string(&path).expect("read file"),
      "# Copyright (c) 2025 Test Corp\n# License text here\n\nprint('x')\n"
    );
  }

  #[test]
  fn test_second_run_is_unchanged() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.js");
    fs::write(&path, "console.log('x');\n").expect("write file");

    let processor = processor(false);
    assert_eq!(processor.process_file(&path), FileOutcome::Rewritten);
    assert_eq!(processor.process_file(&path), FileOutcome::Unchanged);
  }

  #[test]
  fn test_check_only_does_not_write() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");
    fs::write(&path, "print('x')\n").expect("write file");

    assert_eq!(processor(true).process_file(&path), FileOutcome::NeedsRewrite);
    assert_eq!(fs::read_to_string(&path).expect("read file"), "print('x')\n");
  }

  #[test]
  fn test_unsupported_extension_is_skipped() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("notes.xyz");
    fs::write(&path, "hello\n").expect("write file");

    assert_eq!(
      processor(false).process_file(&path),
      FileOutcome::Skipped(SkipReason::UnsupportedExtension)
    );
    assert_eq!(fs::read_to_string(&path).expect("read file"), "hello\n");
  }

  #[test]
  fn test_missing_file_is_skipped() {
    let temp_dir = TempDir::new().expect("create temp dir");

    assert_eq!(
      processor(false).process_file(&temp_dir.path().join("missing.py")),
      FileOutcome::Skipped(SkipReason::NotAFile)
    );
  }

  #[test]
  fn test_invalid_utf8_is_unreadable() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("binary.py");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).expect("write file");

    let outcome = processor(false).process_file(&path);
    assert!(matches!(outcome, FileOutcome::Skipped(SkipReason::Unreadable(_))));
  }

  #[test]
  fn test_custom_resolver() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("flake.nix");
    fs::write(&path, "{ }\n").expect("write file");

    let processor = Processor::new(ProcessorConfig {
      resolver: Box::new(StyleTable::with_overrides([(".nix".to_string(), CommentStyle::line("#"))])),
      ..ProcessorConfig::new(TemplateManager::from_text(TEMPLATE), license_data())
    })
    .expect("processor should build");

    assert_eq!(processor.process_file(&path), FileOutcome::Rewritten);
    assert!(fs::read_to_string(&path).expect("read file").starts_with("# Copyright"));
  }

  #[test]
  fn test_process_keeps_input_order() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let first = temp_dir.path().join("b.py");
    let second = temp_dir.path().join("a.unknown");
    fs::write(&first, "x = 1\n").expect("write file");
    fs::write(&second, "x = 1\n").expect("write file");

    let summary = processor(false).process(&[first.clone(), second.clone()]);

    assert_eq!(summary.files[0].path, first);
    assert_eq!(summary.files[1].path, second);
    assert!(summary.any_changed());
    assert_eq!(summary.skipped(), 1);
  }

  #[test]
  fn test_invalid_pattern_fails_construction() {
    let result = Processor::new(ProcessorConfig {
      exclude: vec!["[bad".to_string()],
      ..ProcessorConfig::new(TemplateManager::from_text(TEMPLATE), license_data())
    });

    assert!(result.is_err());
  }
}
