//! # license-header-hook
//!
//! A tool that inserts, updates, or verifies copyright license headers at the top of source files.
//!
//! `license-header-hook` is meant to run as a pre-commit hook or CI check over an explicit list of files. It wraps a
//! rendered license template in each language's comment syntax, keeps shebang lines first, and only rewrites a file
//! when its leading header differs from the expected one.
//!
//! ## Features
//!
//! * Structural header detection: an outdated header (old year, old holder) is found and replaced
//! * Comment styles for common languages, extensible through `.license-header.toml` or `--comment-style`
//! * Shebang preservation and byte-for-byte preservation of everything after the header
//! * Idempotent: files that already have the expected header are never written
//! * Check mode to verify headers without modifying files
//! * Include/exclude glob patterns
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use license_header_hook::processor::{Processor, ProcessorConfig};
//! use license_header_hook::templates::{LicenseData, TemplateManager};
//!
//! fn main() -> anyhow::Result<()> {
//!     let license_data = LicenseData {
//!         year: "2025".to_string(),
//!         copyright_holder: "Acme Corp".to_string(),
//!     };
//!
//!     let mut template_manager = TemplateManager::new();
//!     template_manager.load_template(Path::new("LICENSE_HEADER.txt"))?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(template_manager, license_data))?;
//!
//!     let summary = processor.process(&[PathBuf::from("src/main.py")]);
//!     if summary.any_changed() {
//!         println!("Some files were updated");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Per-file processing and the header engine
//! * [`comment_style`] - Extension to comment style mapping
//! * [`templates`] - License template loading, rendering and comment wrapping
//! * [`config`] - Configuration file and command-line overrides
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`comment_style`]: crate::comment_style
//! [`templates`]: crate::templates
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod diff;
pub mod exit_codes;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
