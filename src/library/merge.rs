//! Appending a fetched component to an existing library

use std::fs;

use tracing::info;

use crate::bundle::ComponentBundle;
use crate::common::fs::{has_extension, list_files};
use crate::config::Settings;
use crate::error::{self, Result};
use crate::sexpr::{self, CLOSING_MARKER, INDENT, SYMBOL_MARKER};
use crate::symbol::{render, symbol_name};
use crate::transaction::Transaction;

use super::paths::{RewriteReport, rewrite_library};
use super::{FOOTPRINT_EXT, Library};

/// What a merge added to the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub symbol: String,
    pub footprints: usize,
    pub models: usize,
    pub rewrites: RewriteReport,
}

/// Aggregate text with `block` appended inside the envelope
fn append_block<S: AsRef<str>>(header: &[S], block: &[S]) -> String {
    let mut lines: Vec<String> = header.iter().map(|l| l.as_ref().to_string()).collect();
    lines.push(String::new());
    for line in block {
        let line = line.as_ref();
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{INDENT}{line}"));
        }
    }
    lines.push(CLOSING_MARKER.to_string());
    render(&lines)
}

/// Merge `bundle` into `library`.
///
/// The bundle's files are copied, not moved; cleanup is the caller's last
/// step. Any failure restores the aggregate and removes copied files.
pub fn merge_bundle(
    library: &Library,
    bundle: &ComponentBundle,
    settings: &Settings,
) -> Result<MergeReport> {
    let aggregate = library.symbol_file();
    let text = fs::read_to_string(&aggregate).map_err(|e| error::fs::read_error(&aggregate, &e))?;
    let lines: Vec<&str> = text.lines().collect();
    let header = sexpr::strip_closing_line(&lines)
        .ok_or_else(|| error::library::malformed(aggregate.display().to_string()))?;

    let symbol_path = &bundle.symbol_path;
    let source =
        fs::read_to_string(symbol_path).map_err(|e| error::fs::read_error(symbol_path, &e))?;
    let source_lines: Vec<&str> = source.lines().collect();
    let span = sexpr::locate_block(&source_lines, SYMBOL_MARKER)
        .map_err(|e| error::structure::malformed(symbol_path.display().to_string(), e))?;
    let block = &source_lines[span.start..=span.end];
    let symbol = symbol_name(block[0]).unwrap_or_default();

    let mut transaction = Transaction::new();
    transaction.write_file(&aggregate, append_block(header, block))?;

    let footprint_dir = library.footprint_dir();
    transaction.create_dir_all(&footprint_dir)?;
    let footprints = list_files(&bundle.footprint_dir)
        .map_err(|e| error::fs::read_error(&bundle.footprint_dir, &e))?;
    let mut footprint_count = 0;
    for src in footprints.iter().filter(|p| has_extension(p, FOOTPRINT_EXT)) {
        let dst = footprint_dir.join(src.file_name().unwrap_or_default());
        transaction.copy_file(src, &dst)?;
        footprint_count += 1;
    }

    let mut model_count = 0;
    if let Some(models) = &bundle.model_dir {
        let model_dir = library.model_dir();
        transaction.create_dir_all(&model_dir)?;
        for src in list_files(models).map_err(|e| error::fs::read_error(models, &e))? {
            let dst = model_dir.join(src.file_name().unwrap_or_default());
            transaction.copy_file(&src, &dst)?;
            model_count += 1;
        }
    }

    let rewrites = rewrite_library(library, settings, &mut transaction)?;
    transaction.commit();

    info!(
        library = %library.name,
        symbol = %symbol,
        footprints = footprint_count,
        models = model_count,
        "Merged component"
    );
    Ok(MergeReport {
        symbol,
        footprints: footprint_count,
        models: model_count,
        rewrites,
    })
}
