//! Part fetcher: the external tool that downloads vendor parts

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{self, KibraryError, Result};

/// Arguments that make the fetcher write every artifact flat into its cwd
const FLAT_OUTPUT_ARGS: [&str; 8] = [
    "-dir",
    ".",
    "-symbol_lib_dir",
    ".",
    "-footprint_lib",
    ".",
    "-model_dir",
    ".",
];

/// Deposits symbol, footprint and model files for `parts` into `work_dir`
pub trait PartFetcher {
    fn fetch(&self, parts: &[String], work_dir: &Path) -> Result<()>;
}

/// Runs an external fetcher executable
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: String,
}

impl CommandFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PartFetcher for CommandFetcher {
    fn fetch(&self, parts: &[String], work_dir: &Path) -> Result<()> {
        info!(program = %self.program, parts = ?parts, "Fetching parts");
        let status = Command::new(&self.program)
            .args(parts)
            .args(FLAT_OUTPUT_ARGS)
            .current_dir(work_dir)
            .status()
            .map_err(|e| error::bundle::fetcher_failed(&self.program, e.to_string()))?;

        debug!(status = %status, "Fetcher finished");
        if status.success() {
            Ok(())
        } else {
            Err(error::bundle::fetcher_failed(&self.program, status.to_string()))
        }
    }
}

/// Whitespace-separated part numbers from a prompt answer
pub fn parse_parts(answer: &str) -> Result<Vec<String>> {
    let parts: Vec<String> = answer.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        return Err(KibraryError::NoPartsSpecified);
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_parts() {
        assert_eq!(parse_parts(" C2040  C14663 ").unwrap(), vec!["C2040", "C14663"]);
        assert!(matches!(
            parse_parts("   "),
            Err(KibraryError::NoPartsSpecified)
        ));
    }

    #[test]
    fn test_missing_program_fails() {
        let temp = TempDir::new().unwrap();
        let fetcher = CommandFetcher::new("kibrary-no-such-fetcher");
        let err = fetcher.fetch(&["C2040".to_string()], temp.path()).unwrap_err();
        assert!(matches!(err, KibraryError::FetcherFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        let temp = TempDir::new().unwrap();
        assert!(CommandFetcher::new("true").fetch(&[], temp.path()).is_ok());
        assert!(CommandFetcher::new("false").fetch(&[], temp.path()).is_err());
    }
}
