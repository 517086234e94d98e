//! # File Filter Module
//!
//! This module contains components for deciding which target paths are
//! processed, based on include/exclude glob patterns and on the kind of file
//! a path points to.
//!
//! Patterns follow path-suffix semantics: a relative pattern made of N
//! components is matched against the last N components of the path, so
//! `*.py` matches `src/pkg/test.py` and `pkg/*.py` matches `src/pkg/test.py`.
//! A pattern starting with `/` must match the whole path.

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::config::ConfigError;
use crate::report::SkipReason;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<SkipReason>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub const fn skip(reason: SkipReason) -> Self {
    Self {
      should_process: false,
      reason: Some(reason),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file to check
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the file should be processed and why
  /// not if applicable.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// A compiled include or exclude pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
  pattern: Pattern,
  absolute: bool,
  components: usize,
}

impl PathPattern {
  /// Compiles a glob pattern.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidPattern`] if the glob is malformed.
  pub fn new(raw: &str) -> Result<Self, ConfigError> {
    let pattern = Pattern::new(raw).map_err(|e| ConfigError::InvalidPattern {
      pattern: raw.to_string(),
      source: e,
    })?;

    Ok(Self {
      pattern,
      absolute: raw.starts_with('/'),
      components: raw.split('/').filter(|part| !part.is_empty()).count(),
    })
  }

  /// The pattern as written.
  pub fn as_str(&self) -> &str {
    self.pattern.as_str()
  }

  /// Checks whether `path` matches this pattern.
  pub fn matches(&self, path: &Path) -> bool {
    if self.absolute {
      return self.pattern.matches_path_with(path, MATCH_OPTIONS);
    }

    let parts = path_parts(path);
    if parts.len() < self.components {
      return false;
    }

    let suffix = parts[parts.len() - self.components..].join("/");
    self.pattern.matches_with(&suffix, MATCH_OPTIONS)
  }
}

/// The named components of a path, ignoring `.` and the root.
fn path_parts(path: &Path) -> Vec<String> {
  path
    .components()
    .filter_map(|component| match component {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      Component::ParentDir => Some("..".to_string()),
      Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
    })
    .collect()
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<PathPattern>, ConfigError> {
  patterns.iter().map(|raw| PathPattern::new(raw)).collect()
}

/// Filter that applies include and exclude patterns.
///
/// Exclude always wins. With no include patterns every path is included.
pub struct PatternFilter {
  include: Vec<PathPattern>,
  exclude: Vec<PathPattern>,
}

impl PatternFilter {
  /// Creates a new PatternFilter from raw glob patterns.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidPattern`] for the first malformed glob.
  pub fn from_patterns(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
    Ok(Self {
      include: compile_patterns(include)?,
      exclude: compile_patterns(exclude)?,
    })
  }
}

impl FileFilter for PatternFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if let Some(pattern) = self.exclude.iter().find(|pattern| pattern.matches(path)) {
      trace!("{} matches exclude pattern {}", path.display(), pattern.as_str());
      return FilterResult::skip(SkipReason::Excluded);
    }

    if !self.include.is_empty() && !self.include.iter().any(|pattern| pattern.matches(path)) {
      return FilterResult::skip(SkipReason::NotIncluded);
    }

    FilterResult::process()
  }
}

/// Filter that skips missing paths, directories and other non-regular files.
pub struct RegularFileFilter;

impl FileFilter for RegularFileFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if path.is_file() {
      FilterResult::process()
    } else {
      FilterResult::skip(SkipReason::NotAFile)
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Constructs the filter used for a run.
///
/// # Parameters
///
/// * `include` - Glob patterns a path must match to be processed
/// * `exclude` - Glob patterns that prevent a path from being processed
///
/// # Returns
///
/// A new CompositeFilter applying the patterns, then the regular-file check.
pub fn create_default_filter(include: &[String], exclude: &[String]) -> Result<CompositeFilter, ConfigError> {
  let filters: Vec<Box<dyn FileFilter>> = vec![
    Box::new(PatternFilter::from_patterns(include, exclude)?),
    Box::new(RegularFileFilter),
  ];
  Ok(CompositeFilter::new(filters))
}
