//! Shell completions command

use clap::CommandFactory;

use crate::cli::CompletionsArgs;
use crate::error::{self, Result};

fn parse_shell(name: &str) -> Option<clap_complete::Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Some(clap_complete::Shell::Bash),
        "elvish" => Some(clap_complete::Shell::Elvish),
        "fish" => Some(clap_complete::Shell::Fish),
        "powershell" | "pwsh" => Some(clap_complete::Shell::PowerShell),
        "zsh" => Some(clap_complete::Shell::Zsh),
        _ => None,
    }
}

/// Generate shell completions
pub fn run(args: &CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell).ok_or_else(|| {
        error::bundle::invalid_choice(format!(
            "unknown shell '{}' (supported: bash, elvish, fish, powershell, zsh)",
            args.shell
        ))
    })?;

    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "kibrary", &mut std::io::stdout().lock());

    Ok(())
}
