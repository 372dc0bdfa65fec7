//! Structured-text errors

use super::KibraryError;

/// Creates a malformed structure error
pub fn malformed(path: impl Into<String>, reason: impl ToString) -> KibraryError {
    KibraryError::MalformedStructure {
        path: path.into(),
        reason: reason.to_string(),
    }
}
