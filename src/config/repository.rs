//! Repository-wide package index (repository.json)
//!
//! The index is append-only: entries are never rewritten or removed, and
//! unknown top-level fields are carried through untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{self, Result};

/// Index filename in the library root
pub const REPOSITORY_FILE: &str = "repository.json";

/// One indexed package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRef {
    /// Path to the package's metadata.json, relative to the root
    pub path: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extra: Map::new(),
        }
    }
}

/// Contents of repository.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryIndex {
    #[serde(default)]
    pub packages: Vec<PackageRef>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositoryIndex {
    /// Load the index, or an empty one when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            info!(path = %path.display(), "Repository index not found, starting a new one");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|e| error::fs::read_error(path, &e))?;
        serde_json::from_str(&json)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| error::fs::write_error(path, &e))
    }

    pub fn push(&mut self, entry: PackageRef) {
        self.packages.push(entry);
    }

    /// Append one entry to the index file, creating it if needed
    pub fn append_to(path: &Path, entry: PackageRef) -> Result<()> {
        let mut index = Self::load(path)?;
        index.push(entry);
        index.save(path)
    }
}
