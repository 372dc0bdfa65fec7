//! Freshly fetched components waiting to be integrated
//!
//! The part fetcher drops files flat into the working directory.
//! [`wrap_assets`] gathers them into `<stem>.pretty/` and `<stem>.3dshapes/`
//! folders, after which [`scan`] expects exactly one symbol file and one
//! footprint folder.

mod wrap;

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::common::fs::{has_extension, remove_if_exists};
use crate::error::{self, Result};
use crate::library::{FOOTPRINT_DIR_EXT, MODEL_DIR_EXT, SYMBOL_EXT};
use crate::symbol::SymbolFile;

pub use wrap::{WrapReport, wrap_assets};

/// One fetched component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBundle {
    pub symbol_path: PathBuf,
    pub footprint_dir: PathBuf,
    pub model_dir: Option<PathBuf>,
}

impl ComponentBundle {
    /// Name of the bundle's symbol block
    pub fn symbol_name(&self) -> Result<String> {
        let file = SymbolFile::read(&self.symbol_path)?;
        file.first().map(|block| block.name.clone()).ok_or_else(|| {
            error::structure::malformed(
                self.symbol_path.display().to_string(),
                "no symbol block found",
            )
        })
    }

    /// File stem of the symbol file, the base for a new library's name
    pub fn stem(&self) -> String {
        self.symbol_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Candidate bundle parts found in a working directory
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub dir: PathBuf,
    pub symbols: Vec<PathBuf>,
    pub footprint_dirs: Vec<PathBuf>,
    pub model_dirs: Vec<PathBuf>,
}

impl Candidates {
    /// The bundle, when exactly one symbol file and one footprint folder exist
    pub fn bundle(&self) -> Option<ComponentBundle> {
        match (self.symbols.as_slice(), self.footprint_dirs.as_slice()) {
            ([symbol], [footprints]) => Some(ComponentBundle {
                symbol_path: symbol.clone(),
                footprint_dir: footprints.clone(),
                model_dir: match self.model_dirs.as_slice() {
                    [models] => Some(models.clone()),
                    _ => None,
                },
            }),
            _ => None,
        }
    }

    pub fn ambiguity(&self) -> error::KibraryError {
        error::bundle::ambiguous(
            self.dir.display().to_string(),
            self.symbols.len(),
            self.footprint_dirs.len(),
        )
    }
}

/// Collect the direct entries of `work_dir` that could form a bundle
pub fn scan(work_dir: &Path) -> Result<Candidates> {
    let mut candidates = Candidates {
        dir: work_dir.to_path_buf(),
        ..Candidates::default()
    };

    for entry in WalkDir::new(work_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| error::fs::read_failed(work_dir.display().to_string(), e.to_string()))?;
        let path = entry.into_path();

        if path.is_file() && has_extension(&path, SYMBOL_EXT) {
            candidates.symbols.push(path);
        } else if path.is_dir() && has_extension(&path, FOOTPRINT_DIR_EXT) {
            candidates.footprint_dirs.push(path);
        } else if path.is_dir() && has_extension(&path, MODEL_DIR_EXT) {
            candidates.model_dirs.push(path);
        }
    }

    debug!(
        dir = %work_dir.display(),
        symbols = candidates.symbols.len(),
        footprints = candidates.footprint_dirs.len(),
        models = candidates.model_dirs.len(),
        "Scanned for bundle"
    );
    Ok(candidates)
}

/// Resolve the single bundle in `work_dir`, failing when it is ambiguous
pub fn resolve(work_dir: &Path) -> Result<ComponentBundle> {
    let candidates = scan(work_dir)?;
    candidates.bundle().ok_or_else(|| candidates.ambiguity())
}

/// Delete whatever is left of the bundle's files
pub fn cleanup(bundle: &ComponentBundle) -> Result<()> {
    let paths = [Some(&bundle.symbol_path), Some(&bundle.footprint_dir), bundle.model_dir.as_ref()];
    for path in paths.into_iter().flatten() {
        remove_if_exists(path).map_err(|e| error::fs::write_error(path, &e))?;
        debug!(path = %path.display(), "Removed bundle path");
    }
    Ok(())
}
