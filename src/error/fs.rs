//! File system errors

use std::path::Path;

use super::KibraryError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> KibraryError {
    KibraryError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> KibraryError {
    KibraryError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Maps an IO error raised while reading `path`
pub fn read_error(path: &Path, e: &std::io::Error) -> KibraryError {
    read_failed(path.display().to_string(), e.to_string())
}

/// Maps an IO error raised while writing `path`
pub fn write_error(path: &Path, e: &std::io::Error) -> KibraryError {
    write_failed(path.display().to_string(), e.to_string())
}
