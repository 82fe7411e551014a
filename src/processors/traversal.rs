// upres/src/processors/traversal.rs
use crate::core::{Result, UpscaleError};
use crate::utils::is_supported_format;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the supported image files directly inside `dir`, sorted by name.
pub fn collect_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(UpscaleError::MissingInput(dir.to_path_buf()));
    }

    if !dir.is_dir() {
        return Err(UpscaleError::NotADirectory(dir.to_path_buf()));
    }

    let paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Cannot read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_supported_format(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    log::debug!("Found {} candidate(s) in {}", paths.len(), dir.display());

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn keeps_only_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.tiff", "d.gif", "noext"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("e.png"), b"x").unwrap();

        let names: Vec<String> = collect_candidates(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.tiff"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_candidates(&dir.path().join("gone"));
        assert!(matches!(result, Err(UpscaleError::MissingInput(_))));
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            collect_candidates(&file),
            Err(UpscaleError::NotADirectory(_))
        ));
    }
}
