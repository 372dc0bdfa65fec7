//! Library errors

use super::KibraryError;

/// Creates a malformed library error
pub fn malformed(path: impl Into<String>) -> KibraryError {
    KibraryError::MalformedLibrary { path: path.into() }
}

/// Creates a library exists error
pub fn exists(name: impl Into<String>) -> KibraryError {
    KibraryError::LibraryExists { name: name.into() }
}

/// Creates an invalid library name error
pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> KibraryError {
    KibraryError::InvalidLibraryName {
        name: name.into(),
        reason: reason.into(),
    }
}
