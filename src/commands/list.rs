//! List command: show the libraries under the root

use std::path::PathBuf;

use tracing::warn;

use crate::cli::ListArgs;
use crate::common::fs::{has_extension, list_files};
use crate::config::PackageMetadata;
use crate::context::Context;
use crate::error::Result;
use crate::library::{FOOTPRINT_EXT, Library, list_libraries};
use crate::symbol::SymbolFile;
use crate::ui::{self, LibrarySummary};

/// Run list command
pub fn run(root: Option<PathBuf>, work_dir: Option<PathBuf>, args: &ListArgs) -> Result<()> {
    let ctx = Context::load(root, work_dir)?;
    let summaries = summarize_all(&ctx)?;

    if summaries.is_empty() {
        println!("No libraries found.");
        return Ok(());
    }

    ui::heading(&format!("Libraries ({}):", summaries.len()));
    for summary in &summaries {
        ui::display_library(summary, args.detailed);
    }
    Ok(())
}

/// Summaries of every library under the root, in name order
pub fn summarize_all(ctx: &Context) -> Result<Vec<LibrarySummary>> {
    Ok(list_libraries(&ctx.root)?.iter().map(summarize).collect())
}

fn summarize(library: &Library) -> LibrarySummary {
    let symbols = match SymbolFile::read(&library.symbol_file()) {
        Ok(file) => file.names().map(str::to_string).collect(),
        Err(e) => {
            warn!(library = %library.name, "Could not read symbols: {e}");
            Vec::new()
        }
    };
    let footprints = list_files(&library.footprint_dir())
        .map(|files| files.iter().filter(|p| has_extension(p, FOOTPRINT_EXT)).count())
        .unwrap_or(0);

    let description = PackageMetadata::read(&library.metadata_file())
        .ok()
        .map(|metadata| metadata.description);

    LibrarySummary {
        name: library.name.clone(),
        description,
        symbols,
        footprints,
        has_models: library.model_dir().is_dir(),
    }
}
