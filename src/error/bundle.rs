//! Component bundle errors

use super::KibraryError;

/// Creates an ambiguous bundle error
pub fn ambiguous(dir: impl Into<String>, symbols: usize, footprints: usize) -> KibraryError {
    KibraryError::AmbiguousBundle {
        dir: dir.into(),
        symbols,
        footprints,
    }
}

/// Creates a fetcher failure error
pub fn fetcher_failed(program: impl Into<String>, reason: impl Into<String>) -> KibraryError {
    KibraryError::FetcherFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid menu choice error
pub fn invalid_choice(input: impl Into<String>) -> KibraryError {
    KibraryError::InvalidChoice {
        input: input.into(),
    }
}
