//! Add command: integrate one fetched component into a library
//!
//! Order matters: the symbol is edited first, then checked for collisions,
//! then merged or turned into a new library, and only then are the fetched
//! files removed.

use std::path::PathBuf;

use tracing::info;

use crate::bundle::{self, ComponentBundle};
use crate::context::Context;
use crate::error::{self, Result};
use crate::fetcher::{CommandFetcher, PartFetcher, parse_parts};
use crate::kicad::{self, KicadInstall};
use crate::library::create::{default_name, with_suffix};
use crate::library::duplicate::decide;
use crate::library::{
    CollisionDecision, LibraryChoice, create_library, find_collision, list_libraries, merge_bundle,
    select_library,
};
use crate::prompt::{self, Prompter, parse_choice};
use crate::symbol::{SymbolFile, normalize_reference, read_property, set_property};
use crate::ui;

use super::install;

/// How an add run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Merged { library: String, symbol: String },
    Created { library: String },
    /// The user declined adding a duplicate; the bundle was cleaned up
    Aborted,
    /// No component was present and the user chose to install instead
    Installed,
}

/// Run add command against the real terminal, fetcher and KiCad setup
pub fn execute(root: Option<PathBuf>, work_dir: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(root, work_dir)?;
    let mut prompter = prompt::stdio_prompter();
    let fetcher = CommandFetcher::new(&ctx.settings.fetcher);
    let outcome = run(&ctx, prompter.as_mut(), &fetcher, &kicad::detect)?;
    info!(?outcome, "Add finished");
    Ok(())
}

/// What to do when the work dir holds no single component
fn no_component_menu(prompter: &mut dyn Prompter) -> Result<usize> {
    prompter.message("");
    prompter.message("No local components found. Choose an option:");
    prompter.message(" 1 - Download parts and create library");
    prompter.message(" 2 - Install existing libraries to KiCad");
    let answer = prompter.prompt("Select", "1")?;
    parse_choice(&answer, 2).ok_or_else(|| error::bundle::invalid_choice(answer))
}

/// The bundle to integrate, fetching one if needed. `None` means the user
/// picked installation instead and it already ran.
fn obtain_bundle(
    ctx: &Context,
    prompter: &mut dyn Prompter,
    fetcher: &dyn PartFetcher,
    detect: &dyn Fn() -> Vec<KicadInstall>,
) -> Result<Option<ComponentBundle>> {
    bundle::wrap_assets(&ctx.work_dir)?;
    if let Some(found) = bundle::scan(&ctx.work_dir)?.bundle() {
        return Ok(Some(found));
    }

    if no_component_menu(prompter)? == 1 {
        install::run(ctx, prompter, &detect())?;
        return Ok(None);
    }

    let parts = parse_parts(&prompter.prompt("Enter part numbers", "")?)?;
    fetcher.fetch(&parts, &ctx.work_dir)?;
    let wrapped = bundle::wrap_assets(&ctx.work_dir)?;
    info!(footprints = wrapped.footprints, models = wrapped.models, "Wrapped fetched assets");

    bundle::resolve(&ctx.work_dir).map(Some)
}

/// Ask for the description and reference prefix and write them to the symbol
fn edit_properties(bundle: &ComponentBundle, prompter: &mut dyn Prompter) -> Result<()> {
    let file = SymbolFile::read(&bundle.symbol_path)?;
    let lines = file.first().map_or(file.lines(), |block| file.block_lines(block));

    let current = read_property(lines, "Description").unwrap_or_default();
    let description = prompter.prompt("Component description", &current)?;
    set_property(&bundle.symbol_path, "Description", &description)?;

    let current = read_property(lines, "Reference").unwrap_or_default();
    let answer = prompter.prompt("Default reference", &current)?;
    let reference = normalize_reference(&answer, &current);
    if !reference.is_empty() {
        set_property(&bundle.symbol_path, "Reference", &reference)?;
    }
    Ok(())
}

/// Run the whole integration flow
pub fn run(
    ctx: &Context,
    prompter: &mut dyn Prompter,
    fetcher: &dyn PartFetcher,
    detect: &dyn Fn() -> Vec<KicadInstall>,
) -> Result<AddOutcome> {
    let Some(bundle) = obtain_bundle(ctx, prompter, fetcher, detect)? else {
        return Ok(AddOutcome::Installed);
    };

    edit_properties(&bundle, prompter)?;
    let symbol = bundle.symbol_name()?;

    let libraries = list_libraries(&ctx.root)?;
    if let Some(library) = find_collision(&libraries, &symbol)? {
        if decide(prompter, &symbol, library)? == CollisionDecision::Abort {
            ui::step("Aborting.");
            bundle::cleanup(&bundle)?;
            return Ok(AddOutcome::Aborted);
        }
    }

    prompter.message("");
    prompter.message("Add to an existing library or create a new one:");
    let outcome = match select_library(prompter, &libraries)? {
        LibraryChoice::Existing(library) => {
            ui::step(format!("Merging '{symbol}' into '{}'", library.name));
            let report = merge_bundle(&library, &bundle, &ctx.settings)?;
            ui::step(format!(
                "Merge done. {} footprint(s), {} model(s), {} reference(s) updated.",
                report.footprints,
                report.models,
                report.rewrites.namespaces + report.rewrites.models
            ));
            AddOutcome::Merged {
                library: library.name,
                symbol: report.symbol,
            }
        }
        LibraryChoice::CreateNew => {
            let suffix = &ctx.settings.library_suffix;
            let answer = prompter.prompt("Library name", &default_name(&bundle, suffix))?;
            let name = with_suffix(&answer, suffix);
            let description = prompter.prompt("Library description", &name)?;
            create_library(ctx, &bundle, &name, &description)?;
            ui::step(format!("Created library '{name}'."));
            AddOutcome::Created { library: name }
        }
    };

    ui::step("Cleaning up…");
    bundle::cleanup(&bundle)?;

    ui::heading("Additional actions:");
    if prompter.confirm("Install libraries to KiCad?", false)? {
        install::run(ctx, prompter, &detect())?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::config::repository::RepositoryIndex;
    use crate::error::KibraryError;
    use crate::library::Library;
    use crate::prompt::ScriptedPrompter;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const BAR: &str = "(kicad_symbol_lib (version 20211014) (generator JLC2KiCadLib)\n  (symbol \"Bar\" (in_bom yes) (on_board yes)\n    (property \"Reference\" \"q\" (id 0) (at 0 0 0))\n    (property \"Footprint\" \".:bar\" (id 2) (at 0 0 0))\n  )\n)\n";

    /// Writes a flat fetched component, like the real fetcher
    struct FakeFetcher {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PartFetcher for FakeFetcher {
        fn fetch(&self, parts: &[String], work_dir: &Path) -> Result<()> {
            self.calls.borrow_mut().push(parts.to_vec());
            fs::write(work_dir.join("Bar.kicad_sym"), BAR)?;
            fs::write(
                work_dir.join("bar.kicad_mod"),
                "(module bar\n  (model 3dshapes/bar.wrl\n  )\n)\n",
            )?;
            fs::write(work_dir.join("bar.wrl"), "#VRML V2.0 utf8")?;
            Ok(())
        }
    }

    fn no_kicad() -> Vec<KicadInstall> {
        Vec::new()
    }

    fn setup() -> (TempDir, Context) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("libs");
        let work = temp.path().join("work");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&work).unwrap();
        (temp, Context::new(root, work, Settings::default()))
    }

    fn foo_library(ctx: &Context, symbol: &str) -> Library {
        let library = ctx.library("Foo_KSL");
        fs::create_dir_all(library.footprint_dir()).unwrap();
        fs::write(
            library.symbol_file(),
            format!("(kicad_symbol_lib (version 20211014)\n  (symbol \"{symbol}\"\n    (property \"Reference\" \"U\")\n  )\n)\n"),
        )
        .unwrap();
        library
    }

    fn place_bundle(ctx: &Context) {
        fs::write(ctx.work_dir.join("Bar.kicad_sym"), BAR).unwrap();
        fs::create_dir_all(ctx.work_dir.join("Bar.pretty")).unwrap();
        fs::write(ctx.work_dir.join("Bar.pretty").join("bar.kicad_mod"), "(module bar)\n").unwrap();
    }

    #[test]
    fn test_fetch_then_create_library() {
        let (_temp, ctx) = setup();
        let fetcher = FakeFetcher::new();
        // menu, parts, description, reference, library, name, library description, install
        let mut prompter =
            ScriptedPrompter::new(["", "C2040 C14663", "NPN transistor", "q", "", "", "Bars", "n"]);

        let outcome = run(&ctx, &mut prompter, &fetcher, &no_kicad).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Created {
                library: "Bar_KSL".to_string()
            }
        );
        assert_eq!(fetcher.calls.borrow()[0], vec!["C2040", "C14663"]);
        assert_eq!(prompter.remaining(), 0);

        let library = ctx.library("Bar_KSL");
        let text = fs::read_to_string(library.symbol_file()).unwrap();
        assert!(text.contains(r#"(property "Description" "NPN transistor""#));
        assert!(text.contains(r#"(property "Reference" "Q?""#));
        assert!(text.contains(r#""Bar_KSL:bar""#));
        assert!(library.footprint_dir().join("bar.kicad_mod").is_file());
        assert!(library.model_dir().join("bar.wrl").is_file());
        let footprint = fs::read_to_string(library.footprint_dir().join("bar.kicad_mod")).unwrap();
        assert!(footprint.contains("${KSL_ROOT}/Bar_KSL/Bar_KSL.3dshapes/bar.wrl"));

        let index = RepositoryIndex::load(&ctx.repository_index()).unwrap();
        assert_eq!(index.packages.len(), 1);
        assert!(fs::read_dir(&ctx.work_dir).unwrap().next().is_none());
    }

    #[test]
    fn test_merge_into_existing_library() {
        let (_temp, ctx) = setup();
        let library = foo_library(&ctx, "Foo");
        place_bundle(&ctx);

        // description, reference, library 2, install
        let mut prompter = ScriptedPrompter::new(["", "", "2", ""]);
        let outcome = run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Merged {
                library: "Foo_KSL".to_string(),
                symbol: "Bar".to_string()
            }
        );
        let text = fs::read_to_string(library.symbol_file()).unwrap();
        assert!(text.contains("(symbol \"Foo\""));
        assert!(text.contains("(symbol \"Bar\""));
        assert!(library.footprint_dir().join("bar.kicad_mod").is_file());
        assert!(!ctx.work_dir.join("Bar.kicad_sym").exists());
        assert!(!ctx.work_dir.join("Bar.pretty").exists());
    }

    #[test]
    fn test_declined_duplicate_aborts_and_cleans() {
        let (_temp, ctx) = setup();
        let library = foo_library(&ctx, "Bar");
        let before = fs::read_to_string(library.symbol_file()).unwrap();
        place_bundle(&ctx);

        let mut prompter = ScriptedPrompter::new(["", "", "n"]);
        let outcome = run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap();

        assert_eq!(outcome, AddOutcome::Aborted);
        assert_eq!(fs::read_to_string(library.symbol_file()).unwrap(), before);
        assert!(!ctx.work_dir.join("Bar.kicad_sym").exists());
        assert!(!ctx.work_dir.join("Bar.pretty").exists());
        assert!(
            prompter
                .questions()
                .contains(&"Component Bar exists in 'Foo_KSL'. Add anyway? [y/N]".to_string())
        );
    }

    #[test]
    fn test_accepted_duplicate_is_merged() {
        let (_temp, ctx) = setup();
        let library = foo_library(&ctx, "Bar");
        place_bundle(&ctx);

        let mut prompter = ScriptedPrompter::new(["", "", "y", "2", ""]);
        run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap();

        let text = fs::read_to_string(library.symbol_file()).unwrap();
        assert_eq!(text.matches("(symbol \"Bar\"").count(), 2);
    }

    #[test]
    fn test_empty_parts_answer() {
        let (_temp, ctx) = setup();
        let mut prompter = ScriptedPrompter::new(["1", ""]);

        let err = run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap_err();
        assert!(matches!(err, KibraryError::NoPartsSpecified));
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_temp, ctx) = setup();
        let mut prompter = ScriptedPrompter::new(["3"]);

        let err = run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap_err();
        assert!(matches!(err, KibraryError::InvalidChoice { .. }));
    }

    #[test]
    fn test_menu_install_option() {
        let (_temp, ctx) = setup();
        let mut prompter = ScriptedPrompter::new(["2"]);

        let outcome = run(&ctx, &mut prompter, &FakeFetcher::new(), &no_kicad).unwrap();
        assert_eq!(outcome, AddOutcome::Installed);
    }

    #[test]
    fn test_ambiguous_after_fetch() {
        struct NothingFetcher;
        impl PartFetcher for NothingFetcher {
            fn fetch(&self, _parts: &[String], _work_dir: &Path) -> Result<()> {
                Ok(())
            }
        }

        let (_temp, ctx) = setup();
        let mut prompter = ScriptedPrompter::new(["", "C1"]);
        let err = run(&ctx, &mut prompter, &NothingFetcher, &no_kicad).unwrap_err();
        assert!(matches!(err, KibraryError::AmbiguousBundle { .. }));
    }
}
