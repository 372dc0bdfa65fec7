//! Common file system operations with unified error handling

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

/// Copy a directory recursively with options
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: CopyOptions) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options
            .exclude
            .iter()
            .any(|excluded| file_name.to_str() == Some(excluded.as_str()))
        {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&entry_path, &dst_path, options.clone())?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Move a file or directory, copying then deleting when a rename is not possible
pub fn move_path(src: &Path, dst: &Path) -> std::io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        "Rename failed, falling back to copy and delete"
    );
    if src.is_dir() {
        copy_dir_recursive(src, dst, CopyOptions::default())?;
        fs::remove_dir_all(src)
    } else {
        fs::copy(src, dst)?;
        fs::remove_file(src)
    }
}

/// Remove a file or directory tree; a missing path is not an error
pub fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}

/// Regular files directly inside `dir`, sorted by name
pub fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Whether `path` carries extension `ext` (without the dot), ignoring case
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_recursive_with_exclude() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.pretty");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.kicad_mod"), "a").unwrap();
        fs::write(src.join("nested").join("b.kicad_mod"), "b").unwrap();
        fs::write(src.join("skip.txt"), "x").unwrap();

        let dst = temp.path().join("dst.pretty");
        copy_dir_recursive(
            &src,
            &dst,
            CopyOptions {
                exclude: vec!["skip.txt".to_string()],
            },
        )
        .unwrap();

        assert!(dst.join("a.kicad_mod").exists());
        assert!(dst.join("nested").join("b.kicad_mod").exists());
        assert!(!dst.join("skip.txt").exists());
    }

    #[test]
    fn test_move_path_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Bar.pretty");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("bar.kicad_mod"), "bar").unwrap();

        let dst = temp.path().join("Widget_KSL.pretty");
        move_path(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("bar.kicad_mod")).unwrap(), "bar");
    }

    #[test]
    fn test_remove_if_exists() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gone.3dshapes");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("m.wrl"), "").unwrap();

        remove_if_exists(&dir).unwrap();
        remove_if_exists(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_list_files_and_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.STEP"), "").unwrap();
        fs::write(temp.path().join("a.wrl"), "").unwrap();
        fs::create_dir_all(temp.path().join("c.pretty")).unwrap();

        let files = list_files(temp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.wrl"));
        assert!(has_extension(&files[1], "step"));
        assert!(!has_extension(&files[0], "step"));
    }
}
