//! Libraries: named, persistent aggregates of symbols, footprints and models
//!
//! A library `Foo_KSL` lives in `<root>/Foo_KSL/` and holds
//! `Foo_KSL.kicad_sym` (every symbol), `Foo_KSL.pretty/` (footprints),
//! optionally `Foo_KSL.3dshapes/` (models) and `metadata.json`.

pub mod create;
pub mod duplicate;
pub mod merge;
pub mod paths;
pub mod registry;

use std::path::{Path, PathBuf};

use crate::config::metadata::METADATA_FILE;
use crate::error::{self, Result};

pub use create::create_library;
pub use duplicate::{CollisionDecision, find_collision};
pub use merge::merge_bundle;
pub use registry::{LibraryChoice, list_libraries, select_library};

/// Symbol file extension
pub const SYMBOL_EXT: &str = "kicad_sym";

/// Footprint file extension
pub const FOOTPRINT_EXT: &str = "kicad_mod";

/// Footprint collection directory extension
pub const FOOTPRINT_DIR_EXT: &str = "pretty";

/// 3D model collection directory extension
pub const MODEL_DIR_EXT: &str = "3dshapes";

/// Extensions of 3D model files
pub const MODEL_EXTENSIONS: [&str; 4] = ["wrl", "step", "stp", "3ds"];

/// A library folder under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub dir: PathBuf,
}

impl Library {
    pub fn new(name: impl Into<String>, root: &Path) -> Self {
        let name = name.into();
        let dir = root.join(&name);
        Self { name, dir }
    }

    /// The aggregate symbol file
    pub fn symbol_file(&self) -> PathBuf {
        self.dir.join(format!("{}.{SYMBOL_EXT}", self.name))
    }

    pub fn footprint_dir(&self) -> PathBuf {
        self.dir.join(self.footprint_dir_name())
    }

    pub fn footprint_dir_name(&self) -> String {
        format!("{}.{FOOTPRINT_DIR_EXT}", self.name)
    }

    pub fn model_dir(&self) -> PathBuf {
        self.dir.join(self.model_dir_name())
    }

    pub fn model_dir_name(&self) -> String {
        format!("{}.{MODEL_DIR_EXT}", self.name)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    /// Whether the folder holds a correctly named aggregate file
    pub fn exists(&self) -> bool {
        self.symbol_file().is_file()
    }
}

/// Check that `name` can be used as a library folder and namespace
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(error::library::invalid_name(name, "name is empty"));
    }
    if name.trim() != name {
        return Err(error::library::invalid_name(
            name,
            "name has leading or trailing whitespace",
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(error::library::invalid_name(
            name,
            "name contains a path separator",
        ));
    }
    if name.contains(':') {
        return Err(error::library::invalid_name(
            name,
            "':' separates the library namespace from item names",
        ));
    }
    if name == "." || name == ".." {
        return Err(error::library::invalid_name(name, "name is reserved"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_paths() {
        let library = Library::new("Foo_KSL", Path::new("/libs"));
        assert_eq!(library.symbol_file(), Path::new("/libs/Foo_KSL/Foo_KSL.kicad_sym"));
        assert_eq!(library.footprint_dir(), Path::new("/libs/Foo_KSL/Foo_KSL.pretty"));
        assert_eq!(library.model_dir(), Path::new("/libs/Foo_KSL/Foo_KSL.3dshapes"));
        assert_eq!(library.metadata_file(), Path::new("/libs/Foo_KSL/metadata.json"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Widget_KSL").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("Lib:X").is_err());
        assert!(validate_name(" Widget").is_err());
        assert!(validate_name("..").is_err());
    }
}
