#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use assert_cmd::Command;
use license_header_hook::processor::{Processor, ProcessorConfig};
use license_header_hook::templates::{LicenseData, TemplateManager};

/// Template used by most tests.
pub const TEMPLATE: &str = "Copyright (c) {year} {copyright_holder}\nLicense text here";

/// Copyright holder used by most tests.
pub const HOLDER: &str = "Test Corp";

/// Year used by tests that pin it.
pub const YEAR: &str = "2025";

/// The `#` header produced by [`TEMPLATE`] for [`HOLDER`] and [`YEAR`].
pub const HASH_HEADER: &str = "# Copyright (c) 2025 Test Corp\n# License text here\n";

/// The `/* */` header produced by [`TEMPLATE`] for [`HOLDER`] and [`YEAR`].
pub const BLOCK_HEADER: &str = "/*\n * Copyright (c) 2025 Test Corp\n * License text here\n */\n";

pub fn license_data() -> LicenseData {
  LicenseData {
    year: YEAR.to_string(),
    copyright_holder: HOLDER.to_string(),
  }
}

/// Writes a file (creating parent directories) and returns its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// Writes [`TEMPLATE`] to `LICENSE_HEADER.txt` in `dir`.
pub fn write_template(dir: &Path) -> Result<PathBuf> {
  write_file(dir, "LICENSE_HEADER.txt", TEMPLATE)
}

/// Builds a processor from an on-disk template.
pub fn create_processor(template_path: &Path, check_only: bool, include: &[&str], exclude: &[&str]) -> Result<Processor> {
  let mut template_manager = TemplateManager::new();
  template_manager.load_template(template_path)?;

  Processor::new(ProcessorConfig {
    check_only,
    include: include.iter().map(ToString::to_string).collect(),
    exclude: exclude.iter().map(ToString::to_string).collect(),
    ..ProcessorConfig::new(template_manager, license_data())
  })
}

/// A command running the binary in `dir` with the standard template, holder,
/// and year. Config comes only from files the test writes into `dir`.
pub fn hook_command(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("license-header-hook")?;
  cmd
    .current_dir(dir)
    .env_remove("LICENSE_HEADER_CONFIG")
    .env_remove("RUST_LOG")
    .args(["--template", "LICENSE_HEADER.txt"])
    .args(["--copyright-holder", HOLDER])
    .args(["--year", YEAR])
    .arg("--colors=never");
  Ok(cmd)
}
