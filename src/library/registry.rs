//! Enumerating and choosing libraries under the root

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::prompt::Prompter;

use super::Library;

/// Outcome of library selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryChoice {
    CreateNew,
    Existing(Library),
}

/// Direct subdirectories of `root` holding `<dirname>.kicad_sym`, sorted by name
pub fn list_libraries(root: &Path) -> Result<Vec<Library>> {
    let mut libraries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        let library = Library::new(name, root);
        if library.exists() {
            libraries.push(library);
        }
    }

    libraries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(count = libraries.len(), root = %root.display(), "Listed libraries");
    Ok(libraries)
}

/// Ask which library receives the component. Option 1 creates a new one and
/// is also what any unrecognized answer falls back to.
pub fn select_library(prompter: &mut dyn Prompter, libraries: &[Library]) -> Result<LibraryChoice> {
    let mut options = vec!["Create new library".to_string()];
    options.extend(libraries.iter().map(|lib| lib.name.clone()));

    match prompter.select("Libraries:", &options, 0)? {
        Some(0) => Ok(LibraryChoice::CreateNew),
        Some(idx) => Ok(LibraryChoice::Existing(libraries[idx - 1].clone())),
        None => {
            prompter.message("Invalid selection, creating a new library.");
            Ok(LibraryChoice::CreateNew)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use std::fs;
    use tempfile::TempDir;

    fn make_library(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.kicad_sym")), "(kicad_symbol_lib\n)\n").unwrap();
    }

    #[test]
    fn test_list_libraries_requires_matching_aggregate() {
        let temp = TempDir::new().unwrap();
        make_library(temp.path(), "Power_KSL");
        make_library(temp.path(), "Foo_KSL");
        // Wrong aggregate name
        fs::create_dir_all(temp.path().join("Stray")).unwrap();
        fs::write(temp.path().join("Stray").join("Other.kicad_sym"), "").unwrap();
        // Loose files are not libraries
        fs::write(temp.path().join("Bar.kicad_sym"), "").unwrap();

        let names: Vec<String> = list_libraries(temp.path())
            .unwrap()
            .into_iter()
            .map(|lib| lib.name)
            .collect();
        assert_eq!(names, vec!["Foo_KSL", "Power_KSL"]);
    }

    #[test]
    fn test_select_existing_library() {
        let temp = TempDir::new().unwrap();
        make_library(temp.path(), "Foo_KSL");
        let libraries = list_libraries(temp.path()).unwrap();

        let mut prompter = ScriptedPrompter::new(["2"]);
        let choice = select_library(&mut prompter, &libraries).unwrap();
        assert_eq!(choice, LibraryChoice::Existing(libraries[0].clone()));
        assert_eq!(prompter.messages()[1], "  1. Create new library");
    }

    #[test]
    fn test_select_defaults_and_invalid_create_new() {
        let libraries = vec![Library::new("Foo_KSL", Path::new("/libs"))];

        let mut prompter = ScriptedPrompter::new(["", "7"]);
        assert_eq!(
            select_library(&mut prompter, &libraries).unwrap(),
            LibraryChoice::CreateNew
        );
        assert_eq!(
            select_library(&mut prompter, &libraries).unwrap(),
            LibraryChoice::CreateNew
        );
        assert!(
            prompter
                .messages()
                .iter()
                .any(|m| m.starts_with("Invalid selection"))
        );
    }
}
