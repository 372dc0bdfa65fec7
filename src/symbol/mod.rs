//! Symbol files as an ordered list of top-level symbol blocks
//!
//! A `.kicad_sym` file is an envelope (`(kicad_symbol_lib ...` header and a
//! closing `)` line) around a sequence of `(symbol "<name>" ...)` blocks.
//! [`SymbolFile`] keeps the raw lines and records where each top-level block
//! starts and ends, which is all the structure merging and duplicate checks
//! need. Unit sub-symbols (`"<name>_0_1"`) live inside their parent block and
//! are not listed.

pub mod property;

use std::fs;
use std::path::Path;

use crate::error::{self, Result};
use crate::sexpr::{self, BlockError, BlockSpan, DepthTracker, SYMBOL_MARKER};

pub use property::{
    map_property, normalize_reference, read_property, set_property, write_property,
};

/// A named top-level symbol block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolBlock {
    pub name: String,
    pub span: BlockSpan,
}

/// Parsed view of a symbol file
#[derive(Debug, Clone)]
pub struct SymbolFile {
    lines: Vec<String>,
    blocks: Vec<SymbolBlock>,
}

impl SymbolFile {
    /// Index the top-level symbol blocks of `text`
    pub fn parse(text: &str) -> std::result::Result<Self, BlockError> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let mut blocks = Vec::new();
        let mut tracker = DepthTracker::new();
        let mut idx = 0;

        while idx < lines.len() {
            let line = &lines[idx];
            if tracker.depth() <= 1 && line.trim_start().starts_with(SYMBOL_MARKER) {
                let end = sexpr::block_end(&lines, idx)?;
                blocks.push(SymbolBlock {
                    name: symbol_name(line).unwrap_or_default(),
                    span: BlockSpan { start: idx, end },
                });
                for block_line in &lines[idx..=end] {
                    tracker.feed(block_line);
                }
                idx = end + 1;
            } else {
                tracker.feed(line);
                idx += 1;
            }
        }

        Ok(Self { lines, blocks })
    }

    /// Read and index a symbol file from disk
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| error::fs::read_error(path, &e))?;
        Self::parse(&text).map_err(|e| error::structure::malformed(path.display().to_string(), e))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The first top-level symbol, which for a fetched part is its only one
    pub fn first(&self) -> Option<&SymbolBlock> {
        self.blocks.first()
    }

    /// Names of all top-level symbols in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }

    /// Exact name match against the top-level symbols
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Lines of one block, from its opening line to its closing line
    pub fn block_lines(&self, block: &SymbolBlock) -> &[String] {
        &self.lines[block.span.start..=block.span.end]
    }
}

/// Name carried by a `(symbol "<name>"` opening line
pub fn symbol_name(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(SYMBOL_MARKER)?;
    sexpr::read_quoted(rest).map(|(name, _)| name)
}

/// Join lines back into file text with a trailing newline
pub fn render<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}
