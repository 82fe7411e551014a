// upres/src/core/policy.rs
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source itself carries the suffix, so it is a prior output.
    AlreadyUpscaled(PathBuf),
    TargetExists(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyUpscaled(path) => {
                write!(f, "Skipping (already upscaled): {}", path.display())
            }
            SkipReason::TargetExists(path) => {
                write!(f, "Skipping (target exists): {}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Process,
    Skip(SkipReason),
}

/// Decide whether `source` should be upscaled into `destination`.
///
/// The suffix check runs first and does not touch the filesystem, so an
/// already-suffixed source is skipped whether or not its own output exists.
pub fn decide(source: &Path, destination: &Path, suffix: &str) -> Decision {
    if has_upscale_suffix(source, suffix) {
        return Decision::Skip(SkipReason::AlreadyUpscaled(source.to_path_buf()));
    }

    if destination.exists() {
        return Decision::Skip(SkipReason::TargetExists(destination.to_path_buf()));
    }

    Decision::Process
}

pub fn has_upscale_suffix(path: &Path, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }

    let in_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().contains(suffix))
        .unwrap_or(false);
    let in_name = path
        .file_name()
        .map(|name| name.to_string_lossy().contains(suffix))
        .unwrap_or(false);

    in_stem || in_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn suffixed_source_is_skipped_even_without_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a-upscaled.jpg");
        let destination = dir.path().join("a-upscaled-upscaled.jpg");

        assert_eq!(
            decide(&source, &destination, "-upscaled"),
            Decision::Skip(SkipReason::AlreadyUpscaled(source.clone()))
        );
    }

    #[test]
    fn existing_target_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        let destination = dir.path().join("a-upscaled.jpg");
        fs::write(&destination, b"").unwrap();

        assert_eq!(
            decide(&source, &destination, "-upscaled"),
            Decision::Skip(SkipReason::TargetExists(destination.clone()))
        );
    }

    #[test]
    fn fresh_source_is_processed() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("b.png");
        let destination = dir.path().join("b-upscaled.png");

        assert_eq!(decide(&source, &destination, "-upscaled"), Decision::Process);
    }

    #[test]
    fn notice_names_the_file() {
        let reason = SkipReason::TargetExists(PathBuf::from("out/a_X.png"));
        assert_eq!(reason.to_string(), "Skipping (target exists): out/a_X.png");
    }

    #[test]
    fn suffix_match_is_substring() {
        assert!(has_upscale_suffix(Path::new("photo-upscaled-2.png"), "-upscaled"));
        assert!(!has_upscale_suffix(Path::new("photo.png"), "-upscaled"));
        assert!(!has_upscale_suffix(Path::new("photo.png"), ""));
    }
}
