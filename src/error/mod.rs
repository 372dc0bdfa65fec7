//! Error types and handling for Kibrary
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Fetched component bundle errors
//! - [`structure`]: Structured-text (s-expression) errors
//! - [`library`]: Library layout and naming errors
//! - [`table`]: KiCad library table errors
//! - [`config`]: Settings file errors
//! - [`fs`]: File system errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod library;
pub mod structure;
pub mod table;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Kibrary operations
#[derive(Error, Diagnostic, Debug)]
pub enum KibraryError {
    // Bundle errors
    #[error(
        "No single component found in {dir} ({symbols} symbol file(s), {footprints} footprint folder(s))"
    )]
    #[diagnostic(
        code(kibrary::bundle::ambiguous),
        help("Keep exactly one .kicad_sym file and one .pretty folder in the working directory")
    )]
    AmbiguousBundle {
        dir: String,
        symbols: usize,
        footprints: usize,
    },

    #[error("No parts specified")]
    #[diagnostic(
        code(kibrary::bundle::no_parts),
        help("Enter one or more part numbers separated by spaces, e.g. C2040 C14663")
    )]
    NoPartsSpecified,

    #[error("Part fetcher '{program}' failed: {reason}")]
    #[diagnostic(
        code(kibrary::bundle::fetcher_failed),
        help("Check that the fetcher is installed and on PATH, or set `fetcher` in kibrary.yaml")
    )]
    FetcherFailed { program: String, reason: String },

    #[error("Invalid choice: {input}")]
    #[diagnostic(code(kibrary::bundle::invalid_choice))]
    InvalidChoice { input: String },

    // Structure errors
    #[error("Malformed structure in {path}: {reason}")]
    #[diagnostic(code(kibrary::structure::malformed))]
    MalformedStructure { path: String, reason: String },

    // Library errors
    #[error("Bad format in {path}: last line is not the closing ')'")]
    #[diagnostic(
        code(kibrary::library::malformed),
        help("The symbol library must end with a line holding only ')'")
    )]
    MalformedLibrary { path: String },

    #[error("Library '{name}' already exists")]
    #[diagnostic(
        code(kibrary::library::exists),
        help("Pick it from the library list to merge into it, or choose another name")
    )]
    LibraryExists { name: String },

    #[error("Invalid library name '{name}': {reason}")]
    #[diagnostic(code(kibrary::library::invalid_name))]
    InvalidLibraryName { name: String, reason: String },

    // Table errors
    #[error("Malformed library table: {path}")]
    #[diagnostic(
        code(kibrary::table::malformed),
        help("The table must end with a line holding only ')'; restore it from the .backup file")
    )]
    MalformedTable { path: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(kibrary::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(code(kibrary::prompt::failed))]
    PromptFailed { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(kibrary::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(kibrary::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(kibrary::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for KibraryError {
    fn from(err: std::io::Error) -> Self {
        KibraryError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for KibraryError {
    fn from(err: serde_yaml::Error) -> Self {
        KibraryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for KibraryError {
    fn from(err: serde_json::Error) -> Self {
        KibraryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for KibraryError {
    fn from(err: inquire::InquireError) -> Self {
        KibraryError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, KibraryError>;
