//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod hook;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use hook::{HookArgs, run_hook};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add or update headers in the given files
  license-header-hook -t LICENSE_HEADER.txt -c \"Acme Corp\" src/main.py src/app.js

  # Verify headers without modifying files, showing what would change
  license-header-hook -t LICENSE_HEADER.txt -c \"Acme Corp\" --check --show-diff src/*.py

  # Only touch Python files outside vendor/
  license-header-hook -t LICENSE_HEADER.txt -c \"Acme Corp\" -i \"*.py\" -e \"vendor/*\" $(git ls-files)

  # Add a comment style for an extension without a built-in one
  license-header-hook -t LICENSE_HEADER.txt -c \"Acme Corp\" --comment-style \".hs:{-| -|-}\" Main.hs
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub hook_args: HookArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
