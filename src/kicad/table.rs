//! Library table registration
//!
//! A table is a `(sym_lib_table ...)` or `(fp_lib_table ...)` envelope with
//! one `(lib ...)` entry per line. Entries are keyed by name; registering a
//! name twice leaves a single entry. The first modification of a table
//! leaves a `.backup` copy next to it, which is never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{self, Result};
use crate::sexpr::{self, CLOSING_MARKER, INDENT};
use crate::symbol::render;

/// Library type written into every entry
pub const LIB_TYPE: &str = "KiCad";

/// Suffix of the one-time backup copy
pub const BACKUP_SUFFIX: &str = ".backup";

/// One `(lib ...)` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub name: String,
    pub uri: String,
    pub descr: String,
}

impl TableEntry {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, descr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            descr: descr.into(),
        }
    }

    /// The `(name "...")` key searched for in existing tables
    fn key(&self) -> String {
        format!("(name {})", sexpr::quote(&self.name))
    }

    pub fn render(&self) -> String {
        format!(
            "{INDENT}(lib {}(type {})(uri {})(options \"\")(descr {}))",
            self.key(),
            sexpr::quote(LIB_TYPE),
            sexpr::quote(&self.uri),
            sexpr::quote(&self.descr)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    AlreadyPresent,
}

/// Path of the backup copy for `table`
pub fn backup_path(table: &Path) -> PathBuf {
    let mut name = table.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `table` to its backup path unless a backup already exists
pub fn backup_once(table: &Path) -> Result<Option<PathBuf>> {
    let backup = backup_path(table);
    if backup.exists() {
        return Ok(None);
    }
    fs::copy(table, &backup).map_err(|e| error::fs::write_error(&backup, &e))?;
    info!(backup = %backup.display(), "Backup created");
    Ok(Some(backup))
}

/// Add `entry` to `table` unless an entry with the same name exists
pub fn register(table: &Path, entry: &TableEntry) -> Result<Registration> {
    let text = fs::read_to_string(table).map_err(|e| error::fs::read_error(table, &e))?;
    if text.contains(&entry.key()) {
        debug!(library = %entry.name, table = %table.display(), "Already registered");
        return Ok(Registration::AlreadyPresent);
    }

    let lines: Vec<&str> = text.lines().collect();
    let header = sexpr::strip_closing_line(&lines)
        .ok_or_else(|| error::table::malformed(table.display().to_string()))?;

    let mut updated: Vec<String> = header.iter().map(|l| (*l).to_string()).collect();
    updated.push(entry.render());
    updated.push(CLOSING_MARKER.to_string());

    backup_once(table)?;
    fs::write(table, render(&updated)).map_err(|e| error::fs::write_error(table, &e))?;
    info!(library = %entry.name, table = %table.display(), "Registered library");
    Ok(Registration::Added)
}
