//! Gathering loose fetched files into per-kind folders

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wax::{CandidatePath, Glob, Pattern};

use crate::common::fs::{has_extension, list_files};
use crate::error::{self, Result};
use crate::library::{FOOTPRINT_DIR_EXT, FOOTPRINT_EXT, MODEL_DIR_EXT, MODEL_EXTENSIONS};

/// Loose 3D model files, matched against lower-cased file names
const MODEL_GLOB: &str = "*.{wrl,step,stp,3ds}";

/// Number of files moved by [`wrap_assets`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapReport {
    pub footprints: usize,
    pub models: usize,
}

fn is_model_file(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
        return false;
    };
    if let Ok(glob) = Glob::new(MODEL_GLOB) {
        glob.matched(&CandidatePath::from(name.as_str())).is_some()
    } else {
        MODEL_EXTENSIONS.iter().any(|ext| has_extension(path, ext))
    }
}

fn wrap_into(path: &Path, ext: &str) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let dir = parent.join(format!("{stem}.{ext}"));

    fs::create_dir_all(&dir).map_err(|e| error::fs::write_error(&dir, &e))?;
    let target = dir.join(path.file_name().unwrap_or_default());
    fs::rename(path, &target).map_err(|e| error::fs::write_error(&target, &e))?;
    debug!(from = %path.display(), to = %target.display(), "Wrapped asset");
    Ok(target)
}

/// Move loose `*.kicad_mod` files into `<stem>.pretty/` and loose model
/// files into `<stem>.3dshapes/`
pub fn wrap_assets(work_dir: &Path) -> Result<WrapReport> {
    let mut report = WrapReport::default();
    let files = list_files(work_dir).map_err(|e| error::fs::read_error(work_dir, &e))?;

    for path in files {
        if has_extension(&path, FOOTPRINT_EXT) {
            wrap_into(&path, FOOTPRINT_DIR_EXT)?;
            report.footprints += 1;
        } else if is_model_file(&path) {
            wrap_into(&path, MODEL_DIR_EXT)?;
            report.models += 1;
        }
    }

    Ok(report)
}
