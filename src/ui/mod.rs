//! Terminal presentation: status lines, library listings and progress

pub mod progress;

use console::Style;

pub use progress::RegistrationProgress;

/// Print a `→ message` status line
pub fn step(message: impl std::fmt::Display) {
    println!("{} {message}", Style::new().cyan().bold().apply_to("→"));
}

/// Print a section heading preceded by a blank line
pub fn heading(title: &str) {
    println!();
    println!("{}", Style::new().bold().apply_to(title));
}

/// Print a warning status line
pub fn warning(message: impl std::fmt::Display) {
    println!(
        "{} {}",
        Style::new().yellow().bold().apply_to("→"),
        Style::new().yellow().apply_to(message)
    );
}

/// Summary of one library for `list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySummary {
    pub name: String,
    /// From `metadata.json`, when the library has one
    pub description: Option<String>,
    pub symbols: Vec<String>,
    pub footprints: usize,
    pub has_models: bool,
}

/// Print one library in the `list` layout
pub fn display_library(summary: &LibrarySummary, detailed: bool) {
    println!("  {}", Style::new().bold().yellow().apply_to(&summary.name));
    if let Some(description) = &summary.description {
        println!("    {}", Style::new().dim().apply_to(description));
    }
    println!(
        "    {} {}",
        Style::new().bold().apply_to("Symbols:"),
        summary.symbols.len()
    );
    println!(
        "    {} {}",
        Style::new().bold().apply_to("Footprints:"),
        summary.footprints
    );
    println!(
        "    {} {}",
        Style::new().bold().apply_to("3D models:"),
        if summary.has_models {
            Style::new().green().apply_to("yes")
        } else {
            Style::new().dim().apply_to("no")
        }
    );
    if detailed {
        for symbol in &summary.symbols {
            println!("      - {}", Style::new().cyan().apply_to(symbol));
        }
    }
}
