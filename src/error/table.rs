//! KiCad library table errors

use super::KibraryError;

/// Creates a malformed table error
pub fn malformed(path: impl Into<String>) -> KibraryError {
    KibraryError::MalformedTable { path: path.into() }
}
