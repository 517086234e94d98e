//! # File I/O Module
//!
//! Reading and writing of target files. Targets are decoded as UTF-8 in full;
//! anything else is reported back as unreadable rather than rewritten.

use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a target file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read, or if it is not valid UTF-8 (binary
  /// files, other encodings). The error names the byte offset of the first
  /// invalid sequence.
  pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    String::from_utf8(bytes).map_err(|e| {
      anyhow!(
        "{} is not valid UTF-8 (invalid byte at offset {})",
        path.display(),
        e.utf8_error().valid_up_to()
      )
    })
  }

  /// Replaces the content of an existing target file.
  ///
  /// The file is truncated and rewritten in place, so its permissions are
  /// kept.
  pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
