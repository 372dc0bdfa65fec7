//! Name collisions between a fetched symbol and existing libraries

use std::fs;

use tracing::{debug, warn};

use crate::error::{self, Result};
use crate::prompt::Prompter;
use crate::sexpr::{self, SYMBOL_MARKER};
use crate::symbol::SymbolFile;

use super::Library;

/// What to do about a detected collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionDecision {
    /// Add the component anyway
    Proceed,
    /// Clean up the bundle and stop without error
    Abort,
}

/// First library whose aggregate already defines a top-level symbol `name`.
///
/// Aggregates that do not parse are checked by plain text containment of
/// `(symbol "<name>"` instead.
pub fn find_collision<'a>(libraries: &'a [Library], name: &str) -> Result<Option<&'a Library>> {
    for library in libraries {
        let path = library.symbol_file();
        let text = fs::read_to_string(&path).map_err(|e| error::fs::read_error(&path, &e))?;

        let found = match SymbolFile::parse(&text) {
            Ok(file) => file.contains(name),
            Err(e) => {
                warn!(
                    library = %library.name,
                    "Could not index symbols ({e}), falling back to text search"
                );
                text.contains(&format!("{SYMBOL_MARKER}{}", sexpr::quote(name)))
            }
        };

        if found {
            debug!(symbol = name, library = %library.name, "Symbol name collision");
            return Ok(Some(library));
        }
    }
    Ok(None)
}

/// Ask whether to add `name` even though `library` already has it. Default no.
pub fn decide(prompter: &mut dyn Prompter, name: &str, library: &Library) -> Result<CollisionDecision> {
    let question = format!("Component {name} exists in '{}'. Add anyway?", library.name);
    if prompter.confirm(&question, false)? {
        Ok(CollisionDecision::Proceed)
    } else {
        Ok(CollisionDecision::Abort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use std::path::Path;
    use tempfile::TempDir;

    const FOO: &str = "(kicad_symbol_lib (version 20211014)\n  (symbol \"X\"\n    (property \"Reference\" \"U\")\n    (symbol \"X_0_1\"\n      (pin passive line (at 0 0 0) (length 2.54))\n    )\n  )\n)\n";

    fn library_with(root: &Path, name: &str, text: &str) -> Library {
        let library = Library::new(name, root);
        fs::create_dir_all(&library.dir).unwrap();
        fs::write(library.symbol_file(), text).unwrap();
        library
    }

    #[test]
    fn test_collision_reported_for_same_name() {
        let temp = TempDir::new().unwrap();
        let libraries = vec![library_with(temp.path(), "Foo_KSL", FOO)];

        let hit = find_collision(&libraries, "X").unwrap();
        assert_eq!(hit.map(|lib| lib.name.as_str()), Some("Foo_KSL"));
        assert!(find_collision(&libraries, "Y").unwrap().is_none());
    }

    #[test]
    fn test_unit_subsymbol_and_prefix_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let libraries = vec![library_with(temp.path(), "Foo_KSL", FOO)];

        assert!(find_collision(&libraries, "X_0_1").unwrap().is_none());
        assert!(find_collision(&libraries, "XY").unwrap().is_none());
    }

    #[test]
    fn test_unparsable_aggregate_uses_text_search() {
        let temp = TempDir::new().unwrap();
        let broken = "(kicad_symbol_lib\n  (symbol \"X\"\n    (property \"Reference\" \"U\"\n";
        let libraries = vec![
            library_with(temp.path(), "A_KSL", FOO.replace("\"X\"", "\"Other\"").as_str()),
            library_with(temp.path(), "B_KSL", broken),
        ];

        let hit = find_collision(&libraries, "X").unwrap();
        assert_eq!(hit.map(|lib| lib.name.as_str()), Some("B_KSL"));
    }

    #[test]
    fn test_decide_defaults_to_abort() {
        let library = Library::new("Foo_KSL", Path::new("/libs"));
        let mut prompter = ScriptedPrompter::new(["", "y"]);

        assert_eq!(decide(&mut prompter, "X", &library).unwrap(), CollisionDecision::Abort);
        assert_eq!(decide(&mut prompter, "X", &library).unwrap(), CollisionDecision::Proceed);
        assert_eq!(
            prompter.questions()[0],
            "Component X exists in 'Foo_KSL'. Add anyway? [y/N]"
        );
    }
}
