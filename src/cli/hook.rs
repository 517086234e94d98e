//! # Hook Command
//!
//! This module implements the hook run: load the template and configuration,
//! apply headers to every target file, print the outcome, and pick the exit
//! code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, load_config, merge_cli_overrides};
use crate::diff::DiffManager;
use crate::exit_codes::{EXIT_FILES_CHANGED, EXIT_SUCCESS};
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_changed_files, print_hint, print_skipped_files, print_start_message,
  print_summary,
};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::ReportGenerator;
use crate::templates::{LicenseData, TemplateManager};

/// Arguments for the hook run
#[derive(Args, Debug, Default)]
pub struct HookArgs {
  /// Files to process, typically passed by pre-commit
  #[arg(required = false)]
  pub files: Vec<PathBuf>,

  /// License header template file; supports {year} and {copyright_holder}
  #[arg(long, short = 't', value_name = "FILE")]
  pub template: PathBuf,

  /// Copyright holder substituted for {copyright_holder}
  #[arg(long, short = 'c', value_name = "NAME")]
  pub copyright_holder: String,

  /// Only process files matching these glob patterns (repeatable)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub include: Vec<String>,

  /// Never process files matching these glob patterns (repeatable, wins over
  /// --include)
  #[arg(long, short = 'e', value_name = "GLOB")]
  pub exclude: Vec<String>,

  /// Copyright year (default: current year)
  #[arg(long)]
  pub year: Option<String>,

  /// Check mode: report files whose header is missing or outdated without
  /// modifying them
  #[arg(long)]
  pub check: bool,

  /// Show a diff of each change on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of each change to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of per-file outcomes to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .license-header.toml in the current
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Set the comment style for an extension (repeatable). Format:
  /// ".ext:TOKEN" for line comments or ".ext:START|MIDDLE|END" for blocks
  #[arg(long, value_name = "STYLE")]
  pub comment_style: Vec<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and changed paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the hook with the given arguments.
///
/// # Returns
///
/// The process exit code: [`EXIT_FILES_CHANGED`] if any file was rewritten
/// (or needs a rewrite in check mode), [`EXIT_SUCCESS`] otherwise.
///
/// # Errors
///
/// Returns an error for any configuration problem (missing or empty
/// template, invalid config file, malformed pattern or comment style). No
/// file has been touched when an error is returned.
pub fn run_hook(args: HookArgs) -> Result<u8> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let year = args.year.unwrap_or_else(|| chrono::Local::now().year().to_string());
  let license_data = LicenseData {
    year,
    copyright_holder: args.copyright_holder,
  };

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;

  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  if config.as_ref().is_some_and(|c| c.has_overrides()) {
    debug!("Using configuration file for comment style overrides");
  }

  let overrides = CliOverrides::from_cli_args(&args.comment_style, &args.include, &args.exclude)?;
  let settings = merge_cli_overrides(config.as_ref(), overrides)?;
  debug!("{} extensions have a comment style", settings.style_table.len());

  let mut template_manager = TemplateManager::new();
  template_manager
    .load_template(&args.template)
    .with_context(|| format!("Failed to load license template from {}", args.template.display()))?;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    resolver: Box::new(settings.style_table),
    check_only: args.check,
    include: settings.include,
    exclude: settings.exclude,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(template_manager, license_data)
  })?;

  print_start_message(args.files.len(), args.check);

  if args.files.is_empty() {
    print_blank_line();
    print_all_files_ok();
    return Ok(EXIT_SUCCESS);
  }

  let summary = processor.process(&args.files);
  let changed: Vec<_> = summary.changed_files().collect();

  print_blank_line();
  if changed.is_empty() {
    print_all_files_ok();
  } else {
    print_changed_files(&changed, Some(&current_dir), args.check);
  }
  print_skipped_files(summary.skipped_files(), Some(&current_dir));

  print_blank_line();
  print_summary(&summary, args.check);

  if !changed.is_empty() {
    print_blank_line();
    if args.check {
      print_hint("Run without --check to update the headers.");
    } else {
      print_hint("Review and stage the updated files.");
    }
  }

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(&summary) {
      eprintln!("Error generating JSON report: {e:#}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if summary.any_changed() {
    Ok(EXIT_FILES_CHANGED)
  } else {
    Ok(EXIT_SUCCESS)
  }
}
