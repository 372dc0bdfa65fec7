//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kibrary - KiCad shared library manager
///
/// Merge freshly fetched parts into relocatable KiCad libraries.
#[derive(Parser, Debug)]
#[command(
    name = "kibrary",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Merge freshly fetched KiCad parts into shared libraries",
    long_about = "Kibrary takes one freshly fetched component (symbol, footprints and 3D models), \
                  merges it into an existing library or creates a new one, keeps every \
                  symbol/footprint/model reference consistent, and registers the libraries \
                  with KiCad.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  kibrary\n    \
                  kibrary add --root ~/kicad-shared-libs\n    \
                  kibrary install\n    \
                  kibrary list --detailed\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/jazari-akuna/kicad-shared-libs"
)]
pub struct Cli {
    /// Library root holding one folder per library (defaults to current directory)
    #[arg(long, short = 'r', global = true, env = "KIBRARY_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory fetched parts are dropped into (defaults to the library root)
    #[arg(long, global = true, env = "KIBRARY_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Integrate a fetched component into a library (the default)
    Add,

    /// Register every local library with a KiCad installation
    Install,

    /// List local libraries
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all libraries:\n    kibrary list\n\n\
                  Show symbol names too:\n    kibrary list --detailed")]
pub struct ListArgs {
    /// Show the symbols of each library
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    kibrary completions --shell bash > ~/.bash_completion.d/kibrary\n\n\
                  Generate zsh completions:\n    kibrary completions --shell zsh > ~/.zfunc/_kibrary\n\n\
                  Generate fish completions:\n    kibrary completions --shell fish > ~/.config/fish/completions/kibrary.fish\n\n\
                  Generate PowerShell completions:\n    kibrary completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
