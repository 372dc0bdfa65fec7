//! Common test utilities for Kibrary integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Symbol file as the part fetcher writes it
#[allow(dead_code)]
pub const FETCHED_SYMBOL: &str = r#"(kicad_symbol_lib (version 20211014) (generator JLC2KiCadLib)
  (symbol "Bar" (in_bom yes) (on_board yes)
    (property "Reference" "Q" (id 0) (at 0 5.08 0)
      (effects (font (size 1.27 1.27)))
    )
    (property "Footprint" ".:SOT-23" (id 2) (at 0 -5.08 0)
      (effects (font (size 1.27 1.27)) hide)
    )
    (symbol "Bar_0_1"
      (pin passive line (at 0 0 0) (length 2.54))
    )
  )
)
"#;

/// Footprint referencing a model in the fetcher's model folder
#[allow(dead_code)]
pub const FETCHED_FOOTPRINT: &str = r#"(module SOT-23 (layer F.Cu)
  (fp_text reference REF** (at 0 0) (layer F.SilkS))
  (model 3dshapes/SOT-23.wrl
    (offset (xyz 0 0 0))
  )
)
"#;

/// A library root in a temporary directory
pub struct TestRoot {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestRoot {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("libs");
        std::fs::create_dir_all(&path).expect("Failed to create library root");
        Self { temp, path }
    }

    /// Write a file relative to the root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create library `name` holding the given symbols, one footprint folder
    #[allow(dead_code)]
    pub fn create_library(&self, name: &str, symbols: &[&str]) {
        let mut text = String::from("(kicad_symbol_lib (version 20211014) (generator kibrary)\n");
        for symbol in symbols {
            text.push_str(&format!(
                "  (symbol \"{symbol}\" (in_bom yes) (on_board yes)\n    (property \"Reference\" \"U\" (id 0) (at 0 0 0))\n  )\n"
            ));
        }
        text.push_str(")\n");
        self.write_file(&format!("{name}/{name}.kicad_sym"), &text);
        std::fs::create_dir_all(self.path.join(name).join(format!("{name}.pretty")))
            .expect("Failed to create footprint folder");
    }

    /// Drop a fetched component into the root, already wrapped into folders
    #[allow(dead_code)]
    pub fn place_bundle(&self) {
        self.write_file("Bar.kicad_sym", FETCHED_SYMBOL);
        self.write_file("Bar.pretty/SOT-23.kicad_mod", FETCHED_FOOTPRINT);
        self.write_file("Bar.3dshapes/SOT-23.wrl", "#VRML V2.0 utf8\n");
    }

    /// Drop a fetched component as loose files, the way the fetcher leaves it
    #[allow(dead_code)]
    pub fn place_loose_bundle(&self) {
        self.write_file("Bar.kicad_sym", FETCHED_SYMBOL);
        self.write_file("SOT-23.kicad_mod", FETCHED_FOOTPRINT);
        self.write_file("SOT-23.wrl", "#VRML V2.0 utf8\n");
    }

    /// Command for the kibrary binary, rooted here
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kibrary").expect("Failed to find kibrary binary");
        // Developer overrides must not leak into tests
        cmd.env_remove("KIBRARY_ROOT");
        cmd.env_remove("KIBRARY_WORK_DIR");
        cmd.env_remove("RUST_LOG");
        cmd.arg("--root").arg(&self.path);
        cmd
    }
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_creation() {
        let root = TestRoot::new();
        assert!(root.path.is_dir());
    }

    #[test]
    fn test_create_library_layout() {
        let root = TestRoot::new();
        root.create_library("Foo_KSL", &["Foo"]);
        assert!(root.file_exists("Foo_KSL/Foo_KSL.kicad_sym"));
        assert!(root.file_exists("Foo_KSL/Foo_KSL.pretty"));
        assert!(root.read_file("Foo_KSL/Foo_KSL.kicad_sym").ends_with(")\n"));
    }
}
