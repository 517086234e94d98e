mod common;

use std::fs;

use anyhow::Result;
use common::{BLOCK_HEADER, HASH_HEADER, create_processor, write_file, write_template};
use license_header_hook::report::FileOutcome;
use tempfile::tempdir;

#[test]
fn test_empty_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "empty.rs", "")?;

  let processor = create_processor(&template, false, &[], &[])?;
  assert_eq!(processor.process_file(&file), FileOutcome::Rewritten);

  // Only the header and a single trailing newline
  assert_eq!(fs::read_to_string(&file)?, BLOCK_HEADER);
  assert_eq!(processor.process_file(&file), FileOutcome::Unchanged);
  Ok(())
}

#[test]
fn test_whitespace_only_file() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "blank.py", "\n\n   \n")?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, HASH_HEADER);
  Ok(())
}

#[test]
fn test_shebang_only_file_without_newline() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "run.sh", "#!/bin/bash")?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("#!/bin/bash\n{HASH_HEADER}"));
  assert_eq!(processor.process_file(&file), FileOutcome::Unchanged);
  Ok(())
}

#[test]
fn test_body_without_trailing_newline_is_kept_as_is() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "main.go", "package main")?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("{BLOCK_HEADER}\npackage main"));
  Ok(())
}

#[test]
fn test_many_blank_lines_after_header_collapse_to_one() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(
    temp_dir.path(),
    "gaps.py",
    &format!("{HASH_HEADER}\n\n\n\nprint('x')\n"),
  )?;

  let processor = create_processor(&template, false, &[], &[])?;
  assert_eq!(processor.process_file(&file), FileOutcome::Rewritten);

  assert_eq!(fs::read_to_string(&file)?, format!("{HASH_HEADER}\nprint('x')\n"));
  Ok(())
}

#[test]
fn test_header_directly_followed_by_code_gets_blank_line() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "tight.js", &format!("{BLOCK_HEADER}let x = 1;\n"))?;

  let processor = create_processor(&template, false, &[], &[])?;
  assert_eq!(processor.process_file(&file), FileOutcome::Rewritten);

  assert_eq!(fs::read_to_string(&file)?, format!("{BLOCK_HEADER}\nlet x = 1;\n"));
  Ok(())
}

#[test]
fn test_unterminated_block_comment_is_body() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let original = "/* never closed\nint x;\n";
  let file = write_file(temp_dir.path(), "broken.c", original)?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("{BLOCK_HEADER}\n{original}"));
  Ok(())
}

#[test]
fn test_indented_code_after_header_is_untouched() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let body = "    indented = True\n\tTabbed\n  \n";
  let file = write_file(temp_dir.path(), "indent.py", body)?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("{HASH_HEADER}\n{body}"));
  Ok(())
}

#[test]
fn test_unicode_content() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let body = "print('héllo wörld ✓ 日本語')\n";
  let file = write_file(temp_dir.path(), "unicode.py", body)?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("{HASH_HEADER}\n{body}"));
  Ok(())
}

#[test]
fn test_uppercase_extension_is_unsupported() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "LOUD.PY", "x = 1\n")?;

  let processor = create_processor(&template, false, &[], &[])?;

  assert!(matches!(processor.process_file(&file), FileOutcome::Skipped(_)));
  assert_eq!(fs::read_to_string(&file)?, "x = 1\n");
  Ok(())
}

#[test]
fn test_code_after_one_line_comment_is_kept() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let original = "/* eslint-disable */ const x = 1;\nconsole.log(x);\n";
  let file = write_file(temp_dir.path(), "lint.js", original)?;

  let processor = create_processor(&template, false, &[], &[])?;
  assert_eq!(processor.process_file(&file), FileOutcome::Rewritten);
  assert_eq!(fs::read_to_string(&file)?, format!("{BLOCK_HEADER}\n{original}"));
  assert_eq!(processor.process_file(&file), FileOutcome::Unchanged);
  Ok(())
}

#[test]
fn test_code_on_block_closing_line_is_kept() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let original = "/*\n * old\n */ int y = 2;\nint z;\n";
  let file = write_file(temp_dir.path(), "tail.c", original)?;

  let processor = create_processor(&template, false, &[], &[])?;
  processor.process_file(&file);

  assert_eq!(fs::read_to_string(&file)?, format!("{BLOCK_HEADER}\n{original}"));
  Ok(())
}

#[test]
fn test_crlf_file_keeps_crlf_line_endings() -> Result<()> {
  let temp_dir = tempdir()?;
  let template = write_template(temp_dir.path())?;
  let file = write_file(temp_dir.path(), "win.py", "import os\r\nprint(os.name)\r\n")?;

  let processor = create_processor(&template, false, &[], &[])?;
  assert_eq!(processor.process_file(&file), FileOutcome::Rewritten);

  let content = fs::read_to_string(&file)?;
  assert_eq!(content, format!("{}\r\nimport os\r\nprint(os.name)\r\n", HASH_HEADER.replace('\n', "\r\n")));
  assert_eq!(content.matches('\n').count(), content.matches("\r\n").count());
  assert_eq!(processor.process_file(&file), FileOutcome::Unchanged);
  Ok(())
}
