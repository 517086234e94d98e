//! # Comment Style Module
//!
//! This module maps file extensions to the comment tokens used to wrap a
//! license header.
//!
//! The module includes:
//! - [`CommentStyle`] describing how a header is opened, continued and closed
//! - [`StyleTable`], the immutable extension lookup built once per run
//! - [`CommentStyleResolver`], the seam used by the processor to pick a style
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use license_header_hook::comment_style::{CommentStyle, CommentStyleResolver, StyleTable};
//!
//! let table = StyleTable::with_overrides([(".nix".to_string(), CommentStyle::line("#"))]);
//!
//! assert_eq!(table.resolve(Path::new("flake.nix")), Some(CommentStyle::line("#")));
//! assert!(table.resolve(Path::new("notes.unknown")).is_none());
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::verbose_log;

/// Error raised when a comment style is built from invalid tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
  /// One of the three tokens was empty.
  #[error("comment style '{token}' token cannot be empty")]
  EmptyToken { token: &'static str },
  /// The opening or closing token held only whitespace.
  #[error("comment style '{token}' token cannot be only whitespace")]
  BlankToken { token: &'static str },
}

/// How a header is wrapped in comments for a given file type.
///
/// A style whose three tokens are identical is a line style: every header
/// line carries the same prefix. Anything else is a block style with a
/// dedicated opening line, a prefix for each interior line, and a closing
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
  /// Every line is prefixed independently (e.g. `#`, `//`, `--`).
  Line {
    /// The prefix placed before each line
    prefix: String,
  },
  /// One opening token, one closing token, interior lines prefixed.
  Block {
    /// The token alone on the first line (e.g. `/*`)
    start: String,
    /// The prefix of each interior line (e.g. ` *`)
    middle: String,
    /// The token alone on the last line (e.g. ` */`)
    end: String,
  },
}

impl CommentStyle {
  /// Create a line-comment style.
  ///
  /// # Arguments
  ///
  /// * `prefix` - The prefix to use for each line (e.g., "#" or "//")
  pub fn line(prefix: &str) -> Self {
    Self::Line {
      prefix: prefix.to_string(),
    }
  }

  /// Create a block-comment style.
  ///
  /// # Arguments
  ///
  /// * `start` - The string opening the comment block (e.g., "/*")
  /// * `middle` - The prefix for each interior line (e.g., " *")
  /// * `end` - The string closing the comment block (e.g., " */")
  pub fn block(start: &str, middle: &str, end: &str) -> Self {
    Self::Block {
      start: start.to_string(),
      middle: middle.to_string(),
      end: end.to_string(),
    }
  }

  /// Build a style from a `(start, middle, end)` triple.
  ///
  /// Identical tokens produce a [`CommentStyle::Line`], anything else a
  /// [`CommentStyle::Block`].
  ///
  /// # Errors
  ///
  /// Returns [`StyleError::EmptyToken`] if any token is empty, and
  /// [`StyleError::BlankToken`] if `start` or `end` is only whitespace. A
  /// whitespace `middle` is fine (markup headers indent interior lines).
  pub fn from_tokens(start: &str, middle: &str, end: &str) -> Result<Self, StyleError> {
    for (token, value) in [("start", start), ("middle", middle), ("end", end)] {
      if value.is_empty() {
        return Err(StyleError::EmptyToken { token });
      }
    }
    for (token, value) in [("start", start), ("end", end)] {
      if value.trim().is_empty() {
        return Err(StyleError::BlankToken { token });
      }
    }

    if start == middle && middle == end {
      Ok(Self::line(start))
    } else {
      Ok(Self::block(start, middle, end))
    }
  }

  /// The opening token (the prefix for line styles).
  pub fn start(&self) -> &str {
    match self {
      Self::Line { prefix } => prefix,
      Self::Block { start, .. } => start,
    }
  }

  /// The interior line prefix.
  pub fn middle(&self) -> &str {
    match self {
      Self::Line { prefix } => prefix,
      Self::Block { middle, .. } => middle,
    }
  }

  /// The closing token (the prefix for line styles).
  pub fn end(&self) -> &str {
    match self {
      Self::Line { prefix } => prefix,
      Self::Block { end, .. } => end,
    }
  }

  pub const fn is_line(&self) -> bool {
    matches!(self, Self::Line { .. })
  }
}

/// Trait for resolving comment styles for file paths.
///
/// `None` means the file type is unsupported and the file must be skipped.
pub trait CommentStyleResolver: Send + Sync {
  /// Resolve the comment style for the given file path.
  fn resolve(&self, path: &Path) -> Option<CommentStyle>;
}

/// Immutable mapping from extension (leading dot included) to comment style.
///
/// The table is seeded from the built-in defaults and extended or overridden
/// by caller entries when it is constructed. Lookups are case-sensitive.
#[derive(Debug, Clone)]
pub struct StyleTable {
  styles: HashMap<String, CommentStyle>,
}

impl Default for StyleTable {
  fn default() -> Self {
    Self::builtin()
  }
}

impl StyleTable {
  /// Creates a table holding only the built-in defaults.
  pub fn builtin() -> Self {
    let hash = CommentStyle::line("#");
    let slashes = CommentStyle::line("//");
    let dashes = CommentStyle::line("--");
    let c_block = CommentStyle::block("/*", " *", " */");
    let markup = CommentStyle::block("<!--", "  ", "-->");

    let mut styles = HashMap::new();
    for ext in [".py", ".pyx", ".sh", ".bash", ".yml", ".yaml", ".toml", ".rb", ".pl"] {
      styles.insert(ext.to_string(), hash.clone());
    }
    for ext in [
      ".js", ".ts", ".jsx", ".tsx", ".java", ".c", ".cpp", ".cc", ".h", ".hpp", ".go", ".rs", ".css", ".scss",
    ] {
      styles.insert(ext.to_string(), c_block.clone());
    }
    for ext in [".html", ".xml"] {
      styles.insert(ext.to_string(), markup.clone());
    }
    for ext in [".v", ".sv"] {
      styles.insert(ext.to_string(), slashes.clone());
    }
    for ext in [".vhd", ".vhdl", ".sql"] {
      styles.insert(ext.to_string(), dashes.clone());
    }

    Self { styles }
  }

  /// Creates a table from the built-in defaults plus caller entries.
  ///
  /// Entries are applied in order, so later entries win over earlier ones
  /// and every entry wins over a built-in style for the same extension.
  pub fn with_overrides<I>(overrides: I) -> Self
  where
    I: IntoIterator<Item = (String, CommentStyle)>,
  {
    let mut table = Self::builtin();
    for (extension, style) in overrides {
      verbose_log!("Comment style override for {}: {:?}", extension, style);
      table.styles.insert(extension, style);
    }
    table
  }

  /// Looks up the style registered for an extension such as `.py`.
  pub fn get(&self, extension: &str) -> Option<&CommentStyle> {
    self.styles.get(extension)
  }

  /// Number of registered extensions.
  pub fn len(&self) -> usize {
    self.styles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.styles.is_empty()
  }
}

impl CommentStyleResolver for StyleTable {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let extension = extension_key(path)?;
    self.styles.get(&extension).cloned()
  }
}

/// Returns the lookup key for a path: its extension with a leading dot.
///
/// Dotfiles such as `.bashrc` and extensionless files have no key.
pub fn extension_key(path: &Path) -> Option<String> {
  let extension = path.extension()?.to_str()?;
  Some(format!(".{extension}"))
}
