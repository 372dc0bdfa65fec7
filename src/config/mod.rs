//! Configuration and on-disk records
//!
//! - [`Settings`]: optional `kibrary.yaml` at the library root
//! - [`metadata`]: per-library package descriptor (`metadata.json`)
//! - [`repository`]: repository-wide index of packages (`repository.json`)

pub mod metadata;
pub mod repository;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Result};

pub use metadata::PackageMetadata;
pub use repository::RepositoryIndex;

/// Settings filename, looked up in the library root
pub const SETTINGS_FILE: &str = "kibrary.yaml";

/// How 3D model references in footprints are rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPathStyle {
    /// `${ROOT_VAR}/<library>/<model folder>/<file>`, valid on any machine
    #[default]
    Portable,
    /// Keep the fetched path, renaming its `3dshapes` folder segment
    Relative,
}

/// Library root settings (kibrary.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Suffix every library name ends with
    pub library_suffix: String,

    /// GitHub account used for package identifiers and as maintainer
    pub github_user: String,

    /// Repository name used in package identifiers
    pub repository_name: String,

    /// Environment variable that points at the library root inside KiCad
    pub root_env_var: String,

    pub model_paths: ModelPathStyle,

    pub license: String,

    pub author: String,

    pub package_version: String,

    pub kicad_version: String,

    /// External part fetcher executable
    pub fetcher: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library_suffix: "_KSL".to_string(),
            github_user: "jazari-akuna".to_string(),
            repository_name: "kicad-shared-libs".to_string(),
            root_env_var: "KSL_ROOT".to_string(),
            model_paths: ModelPathStyle::Portable,
            license: "CC-BY-SA-4.0".to_string(),
            author: "Unknown".to_string(),
            package_version: "1.0.0".to_string(),
            kicad_version: "9.0".to_string(),
            fetcher: "JLC2KiCadLib".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML, defaulting every missing field
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load `kibrary.yaml` from `root`, or defaults when it does not exist
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let yaml =
            std::fs::read_to_string(&path).map_err(|e| error::fs::read_error(&path, &e))?;
        Self::from_yaml(&yaml)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// The placeholder written into portable model paths, e.g. `${KSL_ROOT}`
    pub fn portability_token(&self) -> String {
        format!("${{{}}}", self.root_env_var)
    }

    /// Package identifier for a library
    pub fn identifier(&self, library: &str) -> String {
        format!(
            "com.github.{}.{}.{library}",
            self.github_user, self.repository_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.library_suffix, "_KSL");
        assert_eq!(settings.portability_token(), "${KSL_ROOT}");
        assert_eq!(settings.model_paths, ModelPathStyle::Portable);
        assert_eq!(
            settings.identifier("Widget_KSL"),
            "com.github.jazari-akuna.kicad-shared-libs.Widget_KSL"
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("library_suffix: _LIB\nmodel_paths: relative\n").unwrap();
        assert_eq!(settings.library_suffix, "_LIB");
        assert_eq!(settings.model_paths, ModelPathStyle::Relative);
        assert_eq!(settings.fetcher, "JLC2KiCadLib");
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Settings::load(temp.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_from_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(SETTINGS_FILE),
            "github_user: someone\nroot_env_var: PARTS_ROOT\n",
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.github_user, "someone");
        assert_eq!(settings.portability_token(), "${PARTS_ROOT}");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(SETTINGS_FILE), "model_paths: [sideways").unwrap();

        let err = Settings::load(temp.path()).unwrap_err();
        assert!(matches!(err, crate::error::KibraryError::ConfigParseFailed { .. }));
    }
}
