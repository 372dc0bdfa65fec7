//! Minimal s-expression scanning for KiCad structured text
//!
//! KiCad symbol, footprint and library-table files are nested parenthesized
//! expressions. Nothing here parses the full grammar: only nesting depth,
//! block boundaries and quoted strings are modelled. Everything else is kept
//! as opaque text so that files round-trip byte-for-byte outside the edits
//! we make.


use thiserror::Error;

/// One nesting level of indentation in KiCad files
pub const INDENT: &str = "  ";

/// Marker that opens a symbol definition
pub const SYMBOL_MARKER: &str = "(symbol ";

/// A library file's closing line
pub const CLOSING_MARKER: &str = ")";

/// Failure to find or edit the extent of a block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("no line starts with `{marker}`")]
    MarkerNotFound { marker: String },

    #[error("unbalanced parentheses in block starting at line {line}")]
    Unbalanced { line: usize },

    #[error("block at line {line} opens and closes on one line")]
    SingleLine { line: usize },
}

/// Inclusive line range occupied by a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// Line holding the opening marker
    pub start: usize,
    /// Line on which the depth returns to zero
    pub end: usize,
}

/// Running nesting depth over a sequence of lines.
///
/// Parentheses inside quoted strings do not count. String state carries over
/// line breaks, so a quoted value spanning several lines is handled too.
#[derive(Debug, Default, Clone)]
pub struct DepthTracker {
    depth: i64,
    in_string: bool,
    escaped: bool,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line and return the depth after it
    pub fn feed(&mut self, line: &str) -> i64 {
        for ch in line.chars() {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == '"' {
                    self.in_string = false;
                }
                continue;
            }
            match ch {
                '"' => self.in_string = true,
                '(' => self.depth += 1,
                ')' => self.depth -= 1,
                _ => {}
            }
        }
        self.depth
    }

    pub fn depth(&self) -> i64 {
        self.depth
    }
}

/// Find the first line whose trimmed content starts with `marker` and the
/// line where its nesting returns to zero.
pub fn locate_block<S: AsRef<str>>(lines: &[S], marker: &str) -> Result<BlockSpan, BlockError> {
    let start = lines
        .iter()
        .position(|line| line.as_ref().trim_start().starts_with(marker))
        .ok_or_else(|| BlockError::MarkerNotFound {
            marker: marker.trim_end().to_string(),
        })?;

    let end = block_end(lines, start)?;
    Ok(BlockSpan { start, end })
}

/// Scan forward from `start` until the depth opened there returns to zero
pub fn block_end<S: AsRef<str>>(lines: &[S], start: usize) -> Result<usize, BlockError> {
    let mut tracker = DepthTracker::new();
    for (idx, line) in lines.iter().enumerate().skip(start) {
        if tracker.feed(line.as_ref()) <= 0 {
            return Ok(idx);
        }
    }
    Err(BlockError::Unbalanced { line: start + 1 })
}

/// Lines that precede a file's closing marker line.
///
/// Trailing blank lines are skipped. Returns `None` when the last remaining
/// line is anything other than the bare closing marker.
pub fn strip_closing_line<S: AsRef<str>>(lines: &[S]) -> Option<&[S]> {
    let last = lines.iter().rposition(|line| !line.as_ref().trim().is_empty())?;
    (lines[last].as_ref().trim() == CLOSING_MARKER).then(|| &lines[..last])
}

/// Leading whitespace of a line
pub fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Parse a quoted string at the start of `input` (leading whitespace allowed).
///
/// Returns the unescaped value and the byte offset just past the closing quote.
pub fn read_quoted(input: &str) -> Option<(String, usize)> {
    let offset = input.len() - input.trim_start().len();
    let rest = &input[offset..];
    let body = rest.strip_prefix('"')?;

    let mut value = String::new();
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        if escaped {
            value.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Some((value, offset + 1 + idx + 1));
        } else {
            value.push(ch);
        }
    }
    None
}

/// Escape a value for use inside a quoted string
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote and escape a value
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}
