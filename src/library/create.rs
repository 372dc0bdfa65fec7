//! Building a new library from a single fetched component

use std::path::Path;

use tracing::info;

use crate::bundle::ComponentBundle;
use crate::common::fs::move_path;
use crate::config::metadata::{METADATA_FILE, PackageContent, PackageMetadata};
use crate::config::repository::{PackageRef, RepositoryIndex};
use crate::context::Context;
use crate::error::{self, Result};
use crate::transaction::Transaction;

use super::paths::rewrite_library;
use super::{Library, validate_name};

/// `name` with `suffix` appended unless it already ends with it
pub fn with_suffix(name: &str, suffix: &str) -> String {
    if name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Suggested name for a library created from `bundle`
pub fn default_name(bundle: &ComponentBundle, suffix: &str) -> String {
    with_suffix(&bundle.stem(), suffix)
}

/// Create library `name` under the root from `bundle`.
///
/// The bundle's files are moved into the new folder, references are
/// rewritten, `metadata.json` is written and the repository index gains
/// one entry. An existing folder of the same name is never touched.
pub fn create_library(
    ctx: &Context,
    bundle: &ComponentBundle,
    name: &str,
    description: &str,
) -> Result<Library> {
    validate_name(name)?;
    let library = ctx.library(name);
    if library.dir.exists() {
        return Err(error::library::exists(name));
    }

    let mut transaction = Transaction::new();
    transaction.create_dir_all(&library.dir)?;

    let mut moves = vec![
        (&bundle.symbol_path, library.symbol_file()),
        (&bundle.footprint_dir, library.footprint_dir()),
    ];
    if let Some(models) = &bundle.model_dir {
        moves.push((models, library.model_dir()));
    }
    for (src, dst) in moves {
        move_path(src, &dst).map_err(|e| error::fs::write_error(&dst, &e))?;
    }

    rewrite_library(&library, &ctx.settings, &mut transaction)?;

    let content = PackageContent {
        symbols: artifact(&library, &library.symbol_file()),
        footprints: artifact(&library, &library.footprint_dir()),
        models: artifact(&library, &library.model_dir()),
    };
    let metadata = PackageMetadata::new(&ctx.settings, name, description, content);
    let metadata_path = library.metadata_file();
    transaction.backup_file(&metadata_path)?;
    metadata.write(&metadata_path)?;

    let index_path = ctx.repository_index();
    transaction.backup_file(&index_path)?;
    RepositoryIndex::append_to(&index_path, PackageRef::new(format!("{name}/{METADATA_FILE}")))?;

    transaction.commit();
    info!(library = %name, dir = %library.dir.display(), "Created library");
    Ok(library)
}

/// Path of an artifact relative to the library folder, if it exists
fn artifact(library: &Library, path: &Path) -> Vec<String> {
    if !path.exists() {
        return Vec::new();
    }
    path.strip_prefix(&library.dir)
        .map(|rel| vec![rel.to_string_lossy().replace('\\', "/")])
        .unwrap_or_default()
}
