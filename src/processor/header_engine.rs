//! # Header Engine Module
//!
//! This module finds, extracts, removes, and replaces the leading license
//! header of a file.
//!
//! A file is read as three parts: an optional shebang line, an optional
//! header block, and the body. The header is recognized by its comment
//! markers alone, so a header with an outdated year or holder is still found
//! and replaced. Only the first comment block after the shebang (and any
//! blank lines) is ever considered.

use std::borrow::Cow;

use crate::comment_style::CommentStyle;
use crate::templates::format_with_comment_style;

/// Marker that opens an interpreter directive line.
pub const SHEBANG_MARKER: &str = "#!";

/// A file split into shebang, existing header, and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDocument<'a> {
  /// The shebang line without its line terminator.
  pub shebang: Option<&'a str>,
  /// The raw header block, from its first marker up to the end of its last
  /// line (no trailing newline).
  pub header: Option<&'a str>,
  /// Everything after the header and the blank lines that follow it.
  pub body: &'a str,
}

/// A single line of text with its byte offsets inside the parent string.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
  text: &'a str,
  start: usize,
}

impl Line<'_> {
  fn is_blank(&self) -> bool {
    self.text.trim().is_empty()
  }

  const fn end(&self) -> usize {
    self.start + self.text.len()
  }
}

/// Splits `content` on `\n`, keeping byte offsets. A trailing newline does
/// not produce an extra empty line.
fn lines_with_offsets(content: &str) -> Vec<Line<'_>> {
  let mut lines = Vec::new();
  let mut start = 0;

  while start < content.len() {
    let (text, next) = match content[start..].find('\n') {
      Some(offset) => (&content[start..start + offset], start + offset + 1),
      None => (&content[start..], content.len()),
    };
    lines.push(Line { text, start });
    start = next;
  }

  lines
}

/// Splits off a leading shebang line.
///
/// Returns the shebang (without its `\n`) and the remaining content. The
/// shebang keeps any `\r` so it can be re-emitted verbatim.
pub fn split_shebang(content: &str) -> (Option<&str>, &str) {
  if !content.starts_with(SHEBANG_MARKER) {
    return (None, content);
  }

  match content.find('\n') {
    Some(end) => (Some(&content[..end]), &content[end + 1..]),
    None => (Some(content), ""),
  }
}

/// Returns the number of lines forming a header at the start of `lines`, or
/// `None` if the lines do not open with a complete header block.
///
/// Markers are compared without their surrounding whitespace, since rendered
/// header lines are right-trimmed. A block only counts as a header when
/// nothing but whitespace follows its closing token on the closing line.
fn header_line_count(lines: &[Line<'_>], style: &CommentStyle) -> Option<usize> {
  match style {
    CommentStyle::Line { prefix } => {
      let prefix = prefix.trim();
      let count = lines
        .iter()
        .take_while(|line| line.text.trim_start().starts_with(prefix))
        .count();
      (count > 0).then_some(count)
    }
    CommentStyle::Block { start, end, .. } => {
      let first = lines.first()?.text.trim_start();
      let opened = first.strip_prefix(start.trim())?;
      let close = closing_token(end);

      if opened.contains(close) {
        return closes_cleanly(opened, close).then_some(1);
      }

      let index = lines.iter().skip(1).position(|line| line.text.contains(close))?;
      closes_cleanly(lines[index + 1].text, close).then_some(index + 2)
    }
  }
}

/// The token searched for to find the end of a block comment.
fn closing_token(end: &str) -> &str {
  let trimmed = end.trim();
  if trimmed.is_empty() { end } else { trimmed }
}

/// Whether only whitespace follows the first `close` in `text`.
fn closes_cleanly(text: &str, close: &str) -> bool {
  text
    .find(close)
    .is_some_and(|position| text[position + close.len()..].trim().is_empty())
}

/// The line terminator used by `content`: `\r\n` when its first line ends
/// with one, `\n` otherwise.
pub fn line_ending(content: &str) -> &'static str {
  match content.find('\n') {
    Some(position) if content[..position].ends_with('\r') => "\r\n",
    _ => "\n",
  }
}

fn skip_blank_lines(lines: &[Line<'_>], from: usize) -> usize {
  let mut index = from;
  while index < lines.len() && lines[index].is_blank() {
    index += 1;
  }
  index
}

/// Parses `content` into shebang, header, and body for the given style.
///
/// Blank lines between the shebang and the header, and blank lines directly
/// after the header, belong to neither part and are dropped from the body.
pub fn parse_document<'a>(content: &'a str, style: &CommentStyle) -> ParsedDocument<'a> {
  let (shebang, rest) = split_shebang(content);
  let lines = lines_with_offsets(rest);

  let first = skip_blank_lines(&lines, 0);
  let (header, after_header) = match header_line_count(&lines[first..], style) {
    Some(count) => {
      let last = first + count - 1;
      let header = &rest[lines[first].start..lines[last].end()];
      (Some(header), skip_blank_lines(&lines, last + 1))
    }
    None => (None, first),
  };

  let body = lines.get(after_header).map_or("", |line| &rest[line.start..]);

  ParsedDocument { shebang, header, body }
}

/// Returns the raw existing header block, if the content has one.
pub fn detect_header<'a>(content: &'a str, style: &CommentStyle) -> Option<&'a str> {
  parse_document(content, style).header
}

/// Strips comment markers from a header block, yielding the text that was
/// wrapped.
///
/// One space after each marker is removed; further indentation is kept.
pub fn extract_header_content(header: &str, style: &CommentStyle) -> String {
  let mut content = Vec::new();

  match style {
    CommentStyle::Line { prefix } => {
      for line in header.lines() {
        content.push(strip_marker(line.trim_end_matches('\r'), prefix));
      }
    }
    CommentStyle::Block { start, middle, end } => {
      let close = closing_token(end);
      let lines: Vec<&str> = header.lines().collect();

      for (index, line) in lines.iter().enumerate() {
        let mut text = *line;
        if index == 0 {
          text = text.trim_start().strip_prefix(start.trim()).unwrap_or(text);
        }
        let is_last = match text.find(close) {
          Some(position) => {
            text = &text[..position];
            true
          }
          None => false,
        };

        let text = if index == 0 {
          text.trim()
        } else {
          strip_marker(text, middle).trim_end()
        };

        // The opening and closing lines only carry text on one-line blocks.
        if !(text.is_empty() && (index == 0 || is_last)) {
          content.push(text);
        }
        if is_last {
          break;
        }
      }
    }
  }

  content.join("\n")
}

/// Removes a comment marker and the single space after it.
fn strip_marker<'a>(line: &'a str, marker: &str) -> &'a str {
  let stripped = line.strip_prefix(marker).or_else(|| {
    let marker = marker.trim();
    line.trim_start().strip_prefix(marker)
  });

  match stripped {
    Some(text) => text.strip_prefix(' ').unwrap_or(text),
    None => line.trim_start(),
  }
}

/// Removes the leading header block and the blank lines that follow it.
///
/// The shebang line and the body are left byte-for-byte intact. Content
/// without a header is returned unchanged.
pub fn remove_header<'a>(content: &'a str, style: &CommentStyle) -> Cow<'a, str> {
  let document = parse_document(content, style);
  if document.header.is_none() {
    return Cow::Borrowed(content);
  }

  let (_, rest) = split_shebang(content);
  let shebang_part = &content[..content.len() - rest.len()];

  Cow::Owned(format!("{}{}", shebang_part, document.body))
}

/// Inserts or replaces license headers in file content.
///
/// The engine holds the rendered (placeholder-free) header text, which is
/// the same for every file in a run, and wraps it per comment style.
#[derive(Debug, Clone)]
pub struct HeaderEngine {
  header_text: String,
}

impl HeaderEngine {
  /// Creates an engine for the given rendered header text.
  pub fn new(header_text: impl Into<String>) -> Self {
    Self {
      header_text: header_text.into(),
    }
  }

  /// The header wrapped in `style`, without a trailing newline.
  pub fn render_block(&self, style: &CommentStyle) -> String {
    format_with_comment_style(&self.header_text, style)
  }

  /// Computes the content `content` should have.
  ///
  /// The result is `shebang`, the rendered header, one blank line, then the
  /// body. Without a body the output ends right after the header's newline.
  /// Inserted lines use the file's own line terminator (see [`line_ending`]).
  pub fn compose(&self, content: &str, style: &CommentStyle) -> String {
    let document = parse_document(content, style);
    let newline = line_ending(content);
    let block = self.render_block(style);

    let mut output = String::with_capacity(content.len() + block.len() * 2 + 4);
    if let Some(shebang) = document.shebang {
      output.push_str(shebang.trim_end_matches('\r'));
      output.push_str(newline);
    }
    for (index, line) in block.split('\n').enumerate() {
      if index > 0 {
        output.push_str(newline);
      }
      output.push_str(line);
    }
    output.push_str(newline);
    if !document.body.is_empty() {
      output.push_str(newline);
      output.push_str(document.body);
    }

    output
  }

  /// Applies the header to `content`.
  ///
  /// Returns [`Cow::Borrowed`] when the content already has exactly the
  /// expected layout, so callers can skip the write.
  pub fn apply<'a>(&self, content: &'a str, style: &CommentStyle) -> Cow<'a, str> {
    let composed = self.compose(content, style);
    if composed == content {
      Cow::Borrowed(content)
    } else {
      Cow::Owned(composed)
    }
  }
}
