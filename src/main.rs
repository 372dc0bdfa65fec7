//! Kibrary - KiCad shared library manager
//!
//! Merges one freshly fetched component into a relocatable KiCad library,
//! keeps symbol, footprint and 3D model references consistent, and
//! registers the libraries with local KiCad installations.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod bundle;
mod cli;
mod commands;
mod common;
mod config;
mod context;
mod error;
mod fetcher;
mod kicad;
mod library;
mod prompt;
mod sexpr;
mod symbol;
mod transaction;
mod ui;

use cli::{Cli, Commands};

/// Log level for the number of `-v` flags
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logs go to stderr so they never mix with prompts and answers on stdout
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::from_default_env().add_directive(log_level(verbose).into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Add) {
        Commands::Add => commands::add::execute(cli.root, cli.work_dir),
        Commands::Install => commands::install::execute(cli.root, cli.work_dir),
        Commands::List(args) => commands::list::run(cli.root, cli.work_dir, &args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
