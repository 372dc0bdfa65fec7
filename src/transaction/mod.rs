//! Staged multi-file operations
//!
//! A merge touches the aggregate symbol file and copies any number of
//! footprint and model files. Everything it does is recorded here so a
//! failure part way through leaves the library as it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! transaction.backup_file(&aggregate)?;
//!
//! // Perform operations...
//! transaction.track_file_created(path);
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{self, Result};

/// Original content of a file modified during the transaction
#[derive(Debug, Clone)]
struct FileBackup {
    path: PathBuf,
    content: Vec<u8>,
}

/// A transaction for atomic library operations
#[derive(Debug, Default)]
pub struct Transaction {
    /// Files modified during this transaction (with original content)
    modified_files: Vec<FileBackup>,

    /// Files created during this transaction
    created_files: HashSet<PathBuf>,

    /// Directories created during this transaction
    created_dirs: HashSet<PathBuf>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current content of `path` before it is modified
    ///
    /// A path that does not exist yet is tracked as created instead.
    pub fn backup_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            self.track_file_created(path);
            return Ok(());
        }
        if self.modified_files.iter().any(|b| b.path == path) {
            return Ok(());
        }

        let content = fs::read(path).map_err(|e| error::fs::read_error(path, &e))?;
        self.modified_files.push(FileBackup {
            path: path.to_path_buf(),
            content,
        });
        Ok(())
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.insert(path.into());
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.insert(path.into());
    }

    /// Create `dir` and any missing parents, tracking each one created
    pub fn create_dir_all(&mut self, dir: &Path) -> Result<()> {
        let missing: Vec<PathBuf> = dir
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .map(Path::to_path_buf)
            .collect();

        fs::create_dir_all(dir).map_err(|e| error::fs::write_error(dir, &e))?;
        for path in missing {
            self.track_dir_created(path);
        }
        Ok(())
    }

    /// Copy `src` to `dst`, tracking `dst` as created or modified
    pub fn copy_file(&mut self, src: &Path, dst: &Path) -> Result<()> {
        self.backup_file(dst)?;
        fs::copy(src, dst).map_err(|e| error::fs::write_error(dst, &e))?;
        Ok(())
    }

    /// Write `content` to `path`, backing up what was there before
    pub fn write_file(&mut self, path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
        self.backup_file(path)?;
        fs::write(path, content).map_err(|e| error::fs::write_error(path, &e))
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Manually trigger a rollback
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }
        debug!(
            created = self.created_files.len(),
            modified = self.modified_files.len(),
            "Rolling back transaction"
        );

        for path in &self.created_files {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }

        for backup in &self.modified_files {
            if let Err(e) = fs::write(&backup.path, &backup.content) {
                warn!("Failed to restore {}: {}", backup.path.display(), e);
            }
        }

        // Deepest first so nested directories empty out before their parents
        let mut dirs: Vec<_> = self.created_dirs.iter().collect();
        dirs.sort_by_key(|b| std::cmp::Reverse(b.components().count()));
        for path in dirs {
            if path.is_dir()
                && fs::read_dir(path)
                    .map(|mut d| d.next().is_none())
                    .unwrap_or(false)
            {
                let _ = fs::remove_dir(path);
            }
        }

        self.committed = true;
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
