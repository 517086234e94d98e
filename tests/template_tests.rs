use std::fs;
use std::path::Path;

use anyhow::Result;
use license_header_hook::comment_style::{CommentStyle, CommentStyleResolver, StyleTable};
use license_header_hook::processor::header_engine::{HeaderEngine, detect_header, extract_header_content, remove_header};
use license_header_hook::templates::{LicenseData, TemplateError, TemplateManager, format_with_comment_style};
use tempfile::tempdir;

fn license_data() -> LicenseData {
  LicenseData {
    year: "2025".to_string(),
    copyright_holder: "Test Company".to_string(),
  }
}

#[test]
fn test_template_loading() -> Result<()> {
  let temp_dir = tempdir()?;
  let template_path = temp_dir.path().join("test_template.txt");
  fs::write(&template_path, "Copyright (c) {year} {copyright_holder}\n")?;

  let mut template_manager = TemplateManager::new();
  template_manager.load_template(&template_path)?;

  assert_eq!(template_manager.render(&license_data()), "Copyright (c) 2025 Test Company");
  Ok(())
}

#[test]
fn test_template_surrounding_blank_lines_are_dropped() -> Result<()> {
  let temp_dir = tempdir()?;
  let template_path = temp_dir.path().join("test_template.txt");
  fs::write(&template_path, "\n\nCopyright {year}\n\nAll rights reserved.\n\n\n")?;

  let mut template_manager = TemplateManager::new();
  template_manager.load_template(&template_path)?;

  let rendered = template_manager.render(&license_data());
  assert_eq!(rendered, "Copyright 2025\n\nAll rights reserved.");
  assert_eq!(
    format_with_comment_style(&rendered, &CommentStyle::line("#")),
    "# Copyright 2025\n#\n# All rights reserved."
  );
  Ok(())
}

#[test]
fn test_missing_template_is_an_error() {
  let mut template_manager = TemplateManager::new();
  let err = template_manager
    .load_template(Path::new("/definitely/not/here.txt"))
    .expect_err("missing template must fail");

  assert!(matches!(err, TemplateError::NotFound { .. }));
  assert!(err.to_string().contains("/definitely/not/here.txt"));
}

#[test]
fn test_comment_formatting_per_file_type() {
  let table = StyleTable::builtin();
  let rendered = TemplateManager::from_text("Copyright (c) {year} {copyright_holder}\nAll rights reserved.")
    .render(&license_data());

  let cases = [
    ("test.rs", "/*\n * Copyright (c) 2025 Test Company\n * All rights reserved.\n */"),
    ("test.py", "# Copyright (c) 2025 Test Company\n# All rights reserved."),
    ("test.sv", "// Copyright (c) 2025 Test Company\n// All rights reserved."),
    ("test.vhdl", "-- Copyright (c) 2025 Test Company\n-- All rights reserved."),
    ("test.xml", "<!--\n   Copyright (c) 2025 Test Company\n   All rights reserved.\n-->"),
  ];

  for (file, expected) in cases {
    let style = table.resolve(Path::new(file)).expect("built-in style");
    assert_eq!(format_with_comment_style(&rendered, &style), expected, "{file}");
  }
}

#[test]
fn test_round_trip_extract_and_remove() {
  let table = StyleTable::builtin();
  let text = "Copyright (c) 2025 Test Company\n\n  Indented clause\nLast line";
  let engine = HeaderEngine::new(text);
  let body = "first line of code\n\n// trailing comment\n";

  for file in ["a.py", "a.c", "a.html", "a.sql", "a.v"] {
    let style = table.resolve(Path::new(file)).expect("built-in style");
    let with_header = engine.compose(body, &style);

    let header = detect_header(&with_header, &style).expect("header should be detected");
    assert_eq!(extract_header_content(header, &style), text, "{file}");
    assert_eq!(remove_header(&with_header, &style), body, "{file}");
  }
}
