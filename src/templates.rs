//! # Templates Module
//!
//! This module provides functionality for loading license templates,
//! rendering them with specific data (the copyright year and holder), and
//! wrapping the rendered text in a file type's comment tokens.
//!
//! The module includes:
//! - [`TemplateManager`] for loading and rendering license templates
//! - [`LicenseData`] for providing data to fill in templates
//! - [`render_template`] for `{placeholder}` substitution
//! - [`format_with_comment_style`] for comment-wrapping rendered text
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use license_header_hook::comment_style::CommentStyle;
//! use license_header_hook::templates::{LicenseData, TemplateManager, format_with_comment_style};
//!
//! # fn main() -> anyhow::Result<()> {
//! let license_data = LicenseData {
//!   year: "2025".to_string(),
//!   copyright_holder: "Acme Corp".to_string(),
//! };
//!
//! let mut template_manager = TemplateManager::new();
//! template_manager.load_template(Path::new("LICENSE_HEADER.txt"))?;
//!
//! let license_text = template_manager.render(&license_data);
//! let header = format_with_comment_style(&license_text, &CommentStyle::line("#"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::comment_style::CommentStyle;
use crate::verbose_log;

/// Placeholder name substituted with the copyright year.
pub const YEAR_PLACEHOLDER: &str = "year";

/// Placeholder name substituted with the copyright holder.
pub const HOLDER_PLACEHOLDER: &str = "copyright_holder";

/// Error type for template loading.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template file does not exist.
  #[error("Template file not found: {}", path.display())]
  NotFound { path: PathBuf },

  /// The template file exists but could not be read.
  #[error("Failed to read template file '{}': {source}", path.display())]
  Unreadable { path: PathBuf, source: std::io::Error },

  /// The template file holds nothing but whitespace.
  #[error("Template file is empty: {}", path.display())]
  Empty { path: PathBuf },
}

/// Data used to fill out a license template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// The copyright year to use in the license
  pub year: String,
  /// The copyright holder to use in the license
  pub copyright_holder: String,
}

impl LicenseData {
  /// Returns the placeholder mapping for this data.
  pub fn placeholders(&self) -> HashMap<&'static str, &str> {
    HashMap::from([
      (YEAR_PLACEHOLDER, self.year.as_str()),
      (HOLDER_PLACEHOLDER, self.copyright_holder.as_str()),
    ])
  }
}

/// Manager for loading and rendering license templates.
///
/// # Examples
///
/// ```rust
/// use license_header_hook::templates::{LicenseData, TemplateManager};
///
/// let manager = TemplateManager::from_text("Copyright (c) {year} {copyright_holder}");
/// let data = LicenseData {
///   year: "2025".to_string(),
///   copyright_holder: "Acme".to_string(),
/// };
///
/// assert_eq!(manager.render(&data), "Copyright (c) 2025 Acme");
/// ```
#[derive(Debug, Default, Clone)]
pub struct TemplateManager {
  /// The loaded license template content
  template: String,
}

impl TemplateManager {
  /// Creates a new empty template manager.
  ///
  /// You must call [`load_template`](Self::load_template) before rendering.
  pub const fn new() -> Self {
    Self {
      template: String::new(),
    }
  }

  /// Creates a template manager from in-memory template text.
  ///
  /// The text is normalized the same way as a loaded file.
  pub fn from_text(text: &str) -> Self {
    Self {
      template: normalize_template(text).to_string(),
    }
  }

  /// Loads a license template from a file.
  ///
  /// Leading blank lines and trailing whitespace are dropped so the rendered
  /// header never starts or ends with an empty comment line.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - The file does not exist
  /// - The file cannot be read or is not valid UTF-8
  /// - The file contains only whitespace
  pub fn load_template(&mut self, path: &Path) -> Result<(), TemplateError> {
    verbose_log!("Loading template from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
      ErrorKind::NotFound => TemplateError::NotFound {
        path: path.to_path_buf(),
      },
      _ => TemplateError::Unreadable {
        path: path.to_path_buf(),
        source: e,
      },
    })?;

    let template = normalize_template(&content);
    if template.is_empty() {
      return Err(TemplateError::Empty {
        path: path.to_path_buf(),
      });
    }

    verbose_log!("Template content:\n{}", template);

    self.template = template.to_string();

    Ok(())
  }

  /// The loaded template text, placeholders untouched.
  pub fn template(&self) -> &str {
    &self.template
  }

  /// Renders the template with the given license data.
  pub fn render(&self, data: &LicenseData) -> String {
    verbose_log!(
      "Rendering template with year: {}, holder: {}",
      data.year,
      data.copyright_holder
    );

    render_template(&self.template, &data.placeholders())
  }
}

/// Strips leading blank lines and trailing whitespace from template text.
fn normalize_template(text: &str) -> &str {
  let trimmed = text.trim_end();
  let first_content = trimmed
    .split_inclusive('\n')
    .take_while(|line| line.trim().is_empty())
    .map(str::len)
    .sum::<usize>();
  &trimmed[first_content..]
}

/// Substitutes `{name}` placeholders with values from the mapping.
///
/// Placeholders without a value are left verbatim.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
///
/// use license_header_hook::templates::render_template;
///
/// let values = HashMap::from([("year", "2025")]);
/// assert_eq!(render_template("{year} {holder}", &values), "2025 {holder}");
/// ```
pub fn render_template(template: &str, values: &HashMap<&str, &str>) -> String {
  static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex must compile"));

  PLACEHOLDER_REGEX
    .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
      Some(value) => (*value).to_string(),
      None => caps[0].to_string(),
    })
    .into_owned()
}

/// Wraps rendered license text in the given comment style.
///
/// Line styles prefix every line, blank ones included, with the token and a
/// space. Block styles put the opening token on its own line, prefix each
/// text line with the middle token and a space, and close with the end token
/// on its own line. Trailing whitespace is trimmed from every produced line.
///
/// The returned block has no trailing newline.
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut lines = Vec::new();

  match style {
    CommentStyle::Line { prefix } => {
      for line in license_text.split('\n') {
        lines.push(format!("{prefix} {line}").trim_end().to_string());
      }
    }
    CommentStyle::Block { start, middle, end } => {
      lines.push(start.trim_end().to_string());
      for line in license_text.split('\n') {
        lines.push(format!("{middle} {line}").trim_end().to_string());
      }
      lines.push(end.trim_end().to_string());
    }
  }

  lines.join("\n")
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn test_data() -> LicenseData {
    LicenseData {
      year: "2025".to_string(),
      copyright_holder: "Test Corp".to_string(),
    }
  }

  #[test]
  fn test_render_substitutes_year_and_holder() {
    let manager = TemplateManager::from_text("Copyright (c) {year} {copyright_holder}\nLicense text here");

    assert_eq!(
      manager.render(&test_data()),
      "Copyright (c) 2025 Test Corp\nLicense text here"
    );
  }

  #[test]
  fn test_render_leaves_unknown_placeholders() {
    let manager = TemplateManager::from_text("Copyright {year} {owner} {not a placeholder}");

    assert_eq!(manager.render(&test_data()), "Copyright 2025 {owner} {not a placeholder}");
  }

  #[test]
  fn test_render_template_repeated_placeholder() {
    let values = HashMap::from([("year", "1999")]);

    assert_eq!(render_template("{year}-{year}", &values), "1999-1999");
  }

  #[test]
  fn test_normalize_template() {
    assert_eq!(normalize_template("\n\n  \nLine 1\nLine 2\n\n"), "Line 1\nLine 2");
    assert_eq!(normalize_template("  indented\n"), "  indented");
    assert_eq!(normalize_template("\n \n"), "");
  }

  #[test]
  fn test_load_template_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("template.txt");
    fs::write(&path, "Copyright (c) {year} {copyright_holder}\n").expect("write template");

    let mut manager = TemplateManager::new();
    manager.load_template(&path).expect("template should load");

    assert_eq!(manager.template(), "Copyright (c) {year} {copyright_holder}");
  }

  #[test]
  fn test_load_template_missing() {
    let mut manager = TemplateManager::new();
    let err = manager
      .load_template(Path::new("/nonexistent/template.txt"))
      .expect_err("missing template must fail");

    assert!(matches!(err, TemplateError::NotFound { .. }));
  }

  #[test]
  fn test_load_template_empty() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("template.txt");
    fs::write(&path, "\n   \n").expect("write template");

    let mut manager = TemplateManager::new();
    let err = manager.load_template(&path).expect_err("empty template must fail");

    assert!(matches!(err, TemplateError::Empty { .. }));
  }

  #[test]
  fn test_format_line_style() {
    let formatted = format_with_comment_style("Line 1\nLine 2", &CommentStyle::line("#"));

    assert_eq!(formatted, "# Line 1\n# Line 2");
  }

  #[test]
  fn test_format_block_style() {
    let formatted = format_with_comment_style("Line 1\nLine 2", &CommentStyle::block("/*", " *", " */"));

    assert_eq!(formatted, "/*\n * Line 1\n * Line 2\n */");
  }

  #[test]
  fn test_format_blank_lines_are_trimmed() {
    let line = format_with_comment_style("Line 1\n\nLine 3", &CommentStyle::line("#"));
    assert_eq!(line, "# Line 1\n#\n# Line 3");

    let block = format_with_comment_style("Line 1\n\nLine 3", &CommentStyle::block("/*", " *", " */"));
    assert_eq!(block, "/*\n * Line 1\n *\n * Line 3\n */");
  }

  #[test]
  fn test_format_markup_style() {
    let formatted = format_with_comment_style("Copyright", &CommentStyle::block("<!--", "  ", "-->"));

    assert_eq!(formatted, "<!--\n   Copyright\n-->");
  }
}
