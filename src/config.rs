//! # Configuration Module
//!
//! This module provides configuration support for license-header-hook,
//! allowing users to add or override comment styles for file extensions and
//! to declare include/exclude patterns once per repository.
//!
//! Configuration can be specified in a `.license-header.toml` file or via the
//! `LICENSE_HEADER_CONFIG` environment variable. Command-line
//! `--comment-style` entries are layered on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::comment_style::{CommentStyle, StyleError, StyleTable};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".license-header.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_HEADER_CONFIG";

/// Separator between the extension and the tokens of a CLI override.
const OVERRIDE_EXTENSION_SEPARATOR: char = ':';

/// Separator between the tokens of a block-style CLI override.
const OVERRIDE_TOKEN_SEPARATOR: char = '|';

/// User-defined comment style configuration.
///
/// `middle` and `end` default to `start`, so a single token declares a line
/// style:
///
/// ```toml
/// [comment-styles]
/// ".nix" = { start = "#" }
/// ".kt" = { start = "/*", middle = " *", end = " */" }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommentStyleConfig {
  /// The opening token, or the line prefix for line styles.
  pub start: String,

  /// The prefix of each interior line.
  #[serde(default)]
  pub middle: Option<String>,

  /// The closing token.
  #[serde(default)]
  pub end: Option<String>,
}

impl CommentStyleConfig {
  /// Create a line-comment style entry.
  pub fn line(prefix: &str) -> Self {
    Self {
      start: prefix.to_string(),
      middle: None,
      end: None,
    }
  }

  /// Create a block-comment style entry.
  pub fn block(start: &str, middle: &str, end: &str) -> Self {
    Self {
      start: start.to_string(),
      middle: Some(middle.to_string()),
      end: Some(end.to_string()),
    }
  }

  /// Converts the entry into a [`CommentStyle`], filling in defaults.
  ///
  /// # Errors
  ///
  /// Returns [`StyleError`] if any resulting token is empty.
  pub fn to_style(&self) -> Result<CommentStyle, StyleError> {
    let middle = self.middle.as_deref().unwrap_or(&self.start);
    let end = self.end.as_deref().unwrap_or(&self.start);
    CommentStyle::from_tokens(&self.start, middle, end)
  }
}

/// Include/exclude patterns applied to every target path.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct FilesConfig {
  /// If non-empty, only paths matching one of these patterns are processed.
  #[serde(default)]
  pub include: Vec<String>,

  /// Paths matching any of these patterns are never processed.
  #[serde(default)]
  pub exclude: Vec<String>,
}

/// Main configuration struct for license-header-hook.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Custom comment styles for file extensions.
  /// Keys are file extensions with the leading dot (e.g., ".kt").
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, CommentStyleConfig>,

  /// File filtering configuration.
  #[serde(default)]
  pub files: FilesConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{}': {source}", path.display())]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A comment style configuration is invalid.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },

  /// A `--comment-style` command-line value is malformed.
  #[error("Invalid comment style override '{value}': {message}")]
  InvalidOverride { value: String, message: String },

  /// An include or exclude pattern is not a valid glob.
  #[error("Invalid file pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    source: glob::PatternError,
  },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} comment style overrides", config.comment_styles.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Extension keys include the leading dot
  /// - Every comment style token is non-empty
  /// - Include and exclude entries are valid glob patterns
  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, style) in &self.comment_styles {
      if !ext.starts_with('.') || ext.len() < 2 {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.clone(),
          message: "extension must start with a leading dot".to_string(),
        });
      }

      style.to_style().map_err(|e| ConfigError::InvalidCommentStyle {
        extension: ext.clone(),
        message: e.to_string(),
      })?;
    }

    for pattern in self.files.include.iter().chain(&self.files.exclude) {
      validate_pattern(pattern)?;
    }

    Ok(())
  }

  /// Check if the configuration has any comment style overrides.
  pub fn has_overrides(&self) -> bool {
    !self.comment_styles.is_empty()
  }

  /// The configured comment styles as `(extension, style)` pairs.
  ///
  /// Entries are sorted by extension so the result does not depend on hash
  /// order.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidCommentStyle`] for an invalid entry. This
  /// only happens for configs built in code, since [`Config::load`] validates.
  pub fn comment_style_entries(&self) -> Result<Vec<(String, CommentStyle)>, ConfigError> {
    let mut entries = self
      .comment_styles
      .iter()
      .map(|(ext, style)| {
        style
          .to_style()
          .map(|style| (ext.clone(), style))
          .map_err(|e| ConfigError::InvalidCommentStyle {
            extension: ext.clone(),
            message: e.to_string(),
          })
      })
      .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
  }
}

/// Checks that a pattern compiles as a glob.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] when it does not.
pub fn validate_pattern(pattern: &str) -> Result<(), ConfigError> {
  glob::Pattern::new(pattern)
    .map(|_| ())
    .map_err(|e| ConfigError::InvalidPattern {
      pattern: pattern.to_string(),
      source: e,
    })
}

/// Parses a command-line comment style override.
///
/// Accepted forms are `.ext:TOKEN` for a line style and
/// `.ext:START|MIDDLE|END` for a block style.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] for any other shape.
pub fn parse_comment_style_override(value: &str) -> Result<(String, CommentStyle), ConfigError> {
  let invalid = |message: &str| ConfigError::InvalidOverride {
    value: value.to_string(),
    message: message.to_string(),
  };

  let (extension, tokens) = value
    .split_once(OVERRIDE_EXTENSION_SEPARATOR)
    .ok_or_else(|| invalid("expected '.ext:TOKEN' or '.ext:START|MIDDLE|END'"))?;

  if !extension.starts_with('.') || extension.len() < 2 {
    return Err(invalid("extension must start with a leading dot"));
  }

  let parts: Vec<&str> = tokens.split(OVERRIDE_TOKEN_SEPARATOR).collect();
  let style = match parts.as_slice() {
    [token] => CommentStyle::from_tokens(token, token, token),
    [start, middle, end] => CommentStyle::from_tokens(start, middle, end),
    _ => return Err(invalid("expected one token or three '|'-separated tokens")),
  }
  .map_err(|e| invalid(&e.to_string()))?;

  Ok((extension.to_string(), style))
}

/// Command-line settings layered on top of the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  /// Parsed `--comment-style` entries, in command-line order.
  pub comment_styles: Vec<(String, CommentStyle)>,
  /// `--include` patterns.
  pub include: Vec<String>,
  /// `--exclude` patterns.
  pub exclude: Vec<String>,
}

impl CliOverrides {
  /// Builds overrides from raw command-line values.
  ///
  /// # Errors
  ///
  /// Returns an error for a malformed `--comment-style` value or an invalid
  /// pattern.
  pub fn from_cli_args(comment_styles: &[String], include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
    let comment_styles = comment_styles
      .iter()
      .map(|value| parse_comment_style_override(value))
      .collect::<Result<Vec<_>, _>>()?;

    for pattern in include.iter().chain(exclude) {
      validate_pattern(pattern)?;
    }

    Ok(Self {
      comment_styles,
      include: include.to_vec(),
      exclude: exclude.to_vec(),
    })
  }
}

/// The effective settings of a run after merging all layers.
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
  /// Extension lookup: built-ins, then config entries, then CLI entries.
  pub style_table: StyleTable,
  /// Config include patterns followed by CLI include patterns.
  pub include: Vec<String>,
  /// Config exclude patterns followed by CLI exclude patterns.
  pub exclude: Vec<String>,
}

/// Merges the optional config file with command-line overrides.
///
/// # Errors
///
/// Returns an error if a config comment style cannot be converted.
pub fn merge_cli_overrides(config: Option<&Config>, overrides: CliOverrides) -> Result<EffectiveSettings, ConfigError> {
  let (mut styles, mut include, mut exclude) = match config {
    Some(config) => (
      config.comment_style_entries()?,
      config.files.include.clone(),
      config.files.exclude.clone(),
    ),
    None => (Vec::new(), Vec::new(), Vec::new()),
  };

  styles.extend(overrides.comment_styles);
  include.extend(overrides.include);
  exclude.extend(overrides.exclude);

  Ok(EffectiveSettings {
    style_table: StyleTable::with_overrides(styles),
    include,
    exclude,
  })
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_HEADER_CONFIG` environment variable
/// 3. `.license-header.toml` in the working directory
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the error instead of silently running without config.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory searched for the default config file
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let default_config = root.join(DEFAULT_CONFIG_FILENAME);
  if default_config.exists() {
    verbose_log!("Using config: {}", default_config.display());
    return Some(default_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory searched for the default config file
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is in use.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
