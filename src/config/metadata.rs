//! KiCad package descriptor (metadata.json)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

use super::Settings;

/// Descriptor filename inside each library folder
pub const METADATA_FILE: &str = "metadata.json";

/// KiCad plugin and content manager schema
pub const PCM_SCHEMA: &str = "https://go.kicad.org/pcm/schemas/v1";

/// Package metadata record for one library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(rename = "$schema")]
    pub schema: String,

    pub name: String,

    pub description: String,

    pub identifier: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub license: String,

    pub author: Contact,

    pub maintainer: Contact,

    pub content: PackageContent,

    pub versions: Vec<PackageVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
}

/// Artifacts shipped by a library, as paths relative to its folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageContent {
    #[serde(default)]
    pub symbols: Vec<String>,

    #[serde(default)]
    pub footprints: Vec<String>,

    #[serde(rename = "3dmodels", default)]
    pub models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVersion {
    pub version: String,
    pub status: String,
    pub kicad_version: String,
}

impl PackageMetadata {
    /// Descriptor for a new library, with fixed fields taken from `settings`
    pub fn new(settings: &Settings, name: &str, description: &str, content: PackageContent) -> Self {
        Self {
            schema: PCM_SCHEMA.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            identifier: settings.identifier(name),
            kind: "library".to_string(),
            license: settings.license.clone(),
            author: Contact {
                name: settings.author.clone(),
            },
            maintainer: Contact {
                name: settings.github_user.clone(),
            },
            content,
            versions: vec![PackageVersion {
                version: settings.package_version.clone(),
                status: "stable".to_string(),
                kicad_version: settings.kicad_version.clone(),
            }],
        }
    }

    /// Read a descriptor from disk
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| error::fs::read_error(path, &e))?;
        serde_json::from_str(&json)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Write the descriptor as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| error::fs::write_error(path, &e))
    }
}
