//! # license-header-hook
//!
//! A pre-commit hook that keeps copyright license headers in source files
//! up to date.

use std::process::ExitCode;

use license_header_hook::cli::{Cli, run_hook};
use license_header_hook::exit_codes::EXIT_CONFIG_ERROR;

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_hook(cli.hook_args) {
    Ok(code) => ExitCode::from(code),
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::from(EXIT_CONFIG_ERROR)
    }
  }
}
