//! KiCad installations and their library tables

pub mod table;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use table::{Registration, TableEntry, register};

/// Symbol library table filename
pub const SYM_TABLE: &str = "sym-lib-table";

/// Footprint library table filename
pub const FP_TABLE: &str = "fp-lib-table";

/// Flatpak config tree, relative to the home directory
const FLATPAK_CONFIG: &str = ".var/app/org.kicad.KiCad/config/kicad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallKind {
    Flatpak,
    Regular,
}

impl fmt::Display for InstallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallKind::Flatpak => write!(f, "Flatpak"),
            InstallKind::Regular => write!(f, "Regular"),
        }
    }
}

/// One versioned KiCad configuration directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KicadInstall {
    pub kind: InstallKind,
    pub version: String,
    pub config_dir: PathBuf,
}

impl KicadInstall {
    pub fn sym_table(&self) -> PathBuf {
        self.config_dir.join(SYM_TABLE)
    }

    pub fn fp_table(&self) -> PathBuf {
        self.config_dir.join(FP_TABLE)
    }
}

impl fmt::Display for KicadInstall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} KiCad {} ({})",
            self.kind,
            self.version,
            self.config_dir.display()
        )
    }
}

/// Numeric ordering key for version directory names, so 10.0 sorts above 9.0
fn version_key(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

/// Installations with both library tables, newest version first within each tree
fn scan_tree(kind: InstallKind, tree: &Path) -> Vec<KicadInstall> {
    let Ok(entries) = fs::read_dir(tree) else {
        return Vec::new();
    };

    let mut versions: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    versions.sort_by(|a, b| version_key(b).cmp(&version_key(a)).then_with(|| b.cmp(a)));

    versions
        .into_iter()
        .map(|version| KicadInstall {
            kind,
            config_dir: tree.join(&version),
            version,
        })
        .filter(|install| install.sym_table().is_file() && install.fp_table().is_file())
        .collect()
}

/// Detect installations under explicit home and config directories
pub fn detect_in(home: Option<&Path>, config_dir: Option<&Path>) -> Vec<KicadInstall> {
    let mut installs = Vec::new();
    if let Some(home) = home {
        installs.extend(scan_tree(InstallKind::Flatpak, &home.join(FLATPAK_CONFIG)));
    }
    if let Some(config_dir) = config_dir {
        installs.extend(scan_tree(InstallKind::Regular, &config_dir.join("kicad")));
    }
    debug!(count = installs.len(), "Detected KiCad installations");
    installs
}

/// Detect installations for the current user
pub fn detect() -> Vec<KicadInstall> {
    detect_in(dirs::home_dir().as_deref(), dirs::config_dir().as_deref())
}
