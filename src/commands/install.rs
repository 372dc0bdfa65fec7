//! Install command: register local libraries with KiCad

use std::path::PathBuf;

use tracing::{debug, info};

use crate::context::Context;
use crate::error::Result;
use crate::kicad::{self, KicadInstall, Registration, TableEntry};
use crate::library::{Library, list_libraries};
use crate::prompt::{self, Prompter, parse_choice};
use crate::ui::{self, RegistrationProgress};

/// What an install run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Installation written to, if any
    pub target: Option<PathBuf>,
    /// Libraries newly added to the symbol table
    pub added: usize,
    /// Libraries whose symbol table entry already existed
    pub skipped: usize,
}

/// Run install command
pub fn execute(root: Option<PathBuf>, work_dir: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(root, work_dir)?;
    let mut prompter = prompt::stdio_prompter();
    let report = run(&ctx, prompter.as_mut(), &kicad::detect())?;
    info!(
        target = ?report.target,
        added = report.added,
        skipped = report.skipped,
        "Install finished"
    );
    Ok(())
}

/// Pick an installation, asking the user
fn choose_install<'a>(
    prompter: &mut dyn Prompter,
    installs: &'a [KicadInstall],
) -> Result<Option<&'a KicadInstall>> {
    ui::heading("Detected KiCad installations:");
    for (idx, install) in installs.iter().enumerate() {
        println!(" {} - {install}", idx + 1);
    }

    if let [install] = installs {
        let question = format!("Install libraries to {} KiCad {}?", install.kind, install.version);
        if prompter.confirm(&question, true)? {
            return Ok(Some(install));
        }
        ui::step("Installation cancelled.");
        return Ok(None);
    }

    let answer = prompter.prompt("Select installation", "1")?;
    match parse_choice(&answer, installs.len()) {
        Some(idx) => Ok(installs.get(idx)),
        None => {
            ui::warning("Invalid choice");
            Ok(None)
        }
    }
}

fn register_library(install: &KicadInstall, library: &Library) -> Result<Registration> {
    let symbols = TableEntry::new(
        &library.name,
        library.symbol_file().display().to_string(),
        format!("Local library: {}", library.name),
    );
    let registration = kicad::register(&install.sym_table(), &symbols)?;

    let footprint_dir = library.footprint_dir();
    if footprint_dir.is_dir() {
        let footprints = TableEntry::new(
            &library.name,
            footprint_dir.display().to_string(),
            format!("Local footprint library: {}", library.name),
        );
        kicad::register(&install.fp_table(), &footprints)?;
    }
    Ok(registration)
}

/// Register every library under the root with one of `installs`
pub fn run(ctx: &Context, prompter: &mut dyn Prompter, installs: &[KicadInstall]) -> Result<InstallReport> {
    let mut report = InstallReport::default();
    if installs.is_empty() {
        ui::step("No KiCad installation detected.");
        return Ok(report);
    }

    let Some(install) = choose_install(prompter, installs)? else {
        return Ok(report);
    };
    ui::step(format!("Installing to {} KiCad {}", install.kind, install.version));
    report.target = Some(install.config_dir.clone());

    let libraries = list_libraries(&ctx.root)?;
    if libraries.is_empty() {
        ui::step(format!("No libraries found in {}", ctx.root.display()));
        return Ok(report);
    }
    let names: Vec<&str> = libraries.iter().map(|lib| lib.name.as_str()).collect();
    ui::step(format!("Found {} libraries: {}", libraries.len(), names.join(", ")));

    let progress = RegistrationProgress::new(libraries.len() as u64);
    let mut results = Vec::with_capacity(libraries.len());
    for library in &libraries {
        progress.start(&library.name);
        match register_library(install, library) {
            Ok(registration) => results.push((library.name.as_str(), registration)),
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }
        progress.inc();
    }
    progress.finish();

    for (name, registration) in results {
        debug!(library = name, ?registration, "Registration result");
        match registration {
            Registration::Added => {
                ui::step(format!("Added '{name}' to {}", kicad::SYM_TABLE));
                report.added += 1;
            }
            Registration::AlreadyPresent => {
                ui::step(format!("Library '{name}' already exists in {}", kicad::SYM_TABLE));
                report.skipped += 1;
            }
        }
    }

    ui::step(format!(
        "Installation complete! Added {} libraries to KiCad.",
        report.added
    ));
    ui::step("Restart KiCad to see the new libraries.");
    Ok(report)
}
