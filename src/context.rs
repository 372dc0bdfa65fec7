//! Explicit run context: library root, working directory and settings

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Settings;
use crate::config::repository::REPOSITORY_FILE;
use crate::error::Result;
use crate::library::Library;

/// Everything a command needs to know about where it operates
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory holding one folder per library
    pub root: PathBuf,

    /// Directory the part fetcher drops new components into
    pub work_dir: PathBuf,

    pub settings: Settings,
}

impl Context {
    /// Build a context from optional CLI paths, loading `kibrary.yaml` from the root
    pub fn load(root: Option<PathBuf>, work_dir: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let root = absolute(&root)?;
        let work_dir = match work_dir {
            Some(path) => absolute(&path)?,
            None => root.clone(),
        };
        let settings = Settings::load(&root)?;

        debug!(root = %root.display(), work_dir = %work_dir.display(), "Loaded context");
        Ok(Self::new(root, work_dir, settings))
    }

    pub fn new(root: PathBuf, work_dir: PathBuf, settings: Settings) -> Self {
        Self {
            root,
            work_dir,
            settings,
        }
    }

    /// Location of `repository.json`
    pub fn repository_index(&self) -> PathBuf {
        self.root.join(REPOSITORY_FILE)
    }

    /// Handle for the library named `name` under the root
    pub fn library(&self, name: &str) -> Library {
        Library::new(name, &self.root)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(dunce::canonicalize(path)?);
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
