//! Configuration errors

use super::KibraryError;

/// Creates a configuration parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> KibraryError {
    KibraryError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
