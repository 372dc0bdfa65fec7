//! Reading and rewriting `(property "<key>" "<value>" ...)` entries
//!
//! Properties are matched by key, never by position. Reads return the first
//! match; writes rewrite every match so that duplicated (malformed) entries
//! stay consistent. A missing property is inserted just before the closing
//! line of the first symbol block, indented like its sibling properties.

use std::fs;
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use crate::error::{self, Result};
use crate::sexpr::{self, BlockError, INDENT, SYMBOL_MARKER};

use super::render;

const PROPERTY_MARKER: &str = "(property";

/// Location of one property entry within a line
#[derive(Debug, Clone, PartialEq, Eq)]
struct PropertySpan {
    key: String,
    value: String,
    /// Byte range of the quoted value, quotes included
    value_range: Range<usize>,
}

fn property_spans(line: &str) -> Vec<PropertySpan> {
    let mut spans = Vec::new();
    let mut search_from = 0;

    while let Some(found) = line[search_from..].find(PROPERTY_MARKER) {
        let after_marker = search_from + found + PROPERTY_MARKER.len();
        search_from = after_marker;

        let Some((key, key_end)) = sexpr::read_quoted(&line[after_marker..]) else {
            continue;
        };
        let value_search = after_marker + key_end;
        let Some((value, value_end)) = sexpr::read_quoted(&line[value_search..]) else {
            continue;
        };
        let rest = &line[value_search..];
        let value_start = value_search + (rest.len() - rest.trim_start().len());

        spans.push(PropertySpan {
            key,
            value,
            value_range: value_start..value_search + value_end,
        });
        search_from = value_search + value_end;
    }

    spans
}

/// Value of the first property named `name`
pub fn read_property<S: AsRef<str>>(lines: &[S], name: &str) -> Option<String> {
    lines.iter().find_map(|line| {
        property_spans(line.as_ref())
            .into_iter()
            .find(|span| span.key == name)
            .map(|span| span.value)
    })
}

/// Set property `name` to `value`, inserting it when absent
pub fn write_property(text: &str, name: &str, value: &str) -> std::result::Result<String, BlockError> {
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let quoted = sexpr::quote(value);
    let mut replaced = 0;

    for line in &mut lines {
        let spans = property_spans(line);
        // Right to left so earlier byte ranges stay valid
        for span in spans.iter().rev().filter(|s| s.key == name) {
            line.replace_range(span.value_range.clone(), &quoted);
            replaced += 1;
        }
    }

    if replaced > 0 {
        debug!(property = name, occurrences = replaced, "Rewrote existing property");
        return Ok(render(&lines));
    }

    let block = sexpr::locate_block(&lines, SYMBOL_MARKER)?;
    if block.start == block.end {
        return Err(BlockError::SingleLine {
            line: block.start + 1,
        });
    }

    let indent = lines[block.start + 1..block.end]
        .iter()
        .find(|line| line.trim_start().starts_with(PROPERTY_MARKER))
        .map_or_else(
            || format!("{}{INDENT}", sexpr::indentation(&lines[block.start])),
            |line| sexpr::indentation(line).to_string(),
        );

    let inserted = property_block(&indent, name, &quoted);
    debug!(property = name, line = block.end + 1, "Inserted missing property");
    let tail = lines.split_off(block.end);
    lines.extend(inserted);
    lines.extend(tail);

    Ok(render(&lines))
}

/// Rewrite the value of every property named `name` for which `rewrite`
/// returns a replacement. Returns the new text and the number of values changed.
pub fn map_property<F>(text: &str, name: &str, mut rewrite: F) -> (String, usize)
where
    F: FnMut(&str) -> Option<String>,
{
    let mut changed = 0;
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let mut line = line.to_string();
            for span in property_spans(&line).iter().rev().filter(|s| s.key == name) {
                if let Some(value) = rewrite(&span.value).filter(|v| *v != span.value) {
                    line.replace_range(span.value_range.clone(), &sexpr::quote(&value));
                    changed += 1;
                }
            }
            line
        })
        .collect();

    if changed == 0 {
        return (text.to_string(), 0);
    }
    (render(&lines), changed)
}

/// Minimal hidden property entry that KiCad will load
fn property_block(indent: &str, name: &str, quoted_value: &str) -> Vec<String> {
    let inner = format!("{indent}{INDENT}");
    let innermost = format!("{inner}{INDENT}");
    vec![
        format!("{indent}(property {} {quoted_value}", sexpr::quote(name)),
        format!("{inner}(at 0 0 0)"),
        format!("{inner}(effects"),
        format!("{innermost}(font (size 1.27 1.27))"),
        format!("{innermost}(hide yes)"),
        format!("{inner})"),
        format!("{indent})"),
    ]
}

/// Rewrite property `name` in the symbol file at `path` and persist it
pub fn set_property(path: &Path, name: &str, value: &str) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| error::fs::read_error(path, &e))?;
    let updated = write_property(&text, name, value)
        .map_err(|e| error::structure::malformed(path.display().to_string(), e))?;
    fs::write(path, updated).map_err(|e| error::fs::write_error(path, &e))
}

/// Normalize a reference designator answer: upper-cased, falling back to the
/// current value, and ending in `?` unless empty.
pub fn normalize_reference(answer: &str, current: &str) -> String {
    let answer = answer.trim().to_uppercase();
    let mut reference = if answer.is_empty() {
        current.to_string()
    } else {
        answer
    };
    if !reference.is_empty() && !reference.ends_with('?') {
        reference.push('?');
    }
    reference
}
