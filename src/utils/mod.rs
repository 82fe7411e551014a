// upres/src/utils/mod.rs
use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "bmp", "tiff"];

const FALLBACK_EXTENSION: &str = "jpg";

/// Normalize a user-supplied input path.
///
/// A trailing `*` (with the separator before it) is dropped so that
/// `photos/*` means the `photos` directory, a leading `~` expands to the
/// home directory, and the result is canonicalized when it exists.
pub fn resolve_input_path(raw: &str) -> PathBuf {
    let mut raw = raw;
    if let Some(stripped) = raw.strip_suffix('*') {
        raw = stripped.trim_end_matches(['/', '\\']);
        if raw.is_empty() {
            // `*` alone means the current directory, `/*` the root.
            raw = if stripped.is_empty() { "." } else { &stripped[..1] };
        }
    }

    let expanded = expand_home(raw);
    match expanded.canonicalize() {
        Ok(path) => path,
        Err(_) => std::path::absolute(&expanded).unwrap_or(expanded),
    }
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(raw),
    };

    match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

/// Output file name for `input`: `<stem><suffix>.<ext>`.
pub fn output_file_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    format!("{}{}.{}", stem, suffix, extension)
}

/// Sibling of `input` with the suffix inserted before the extension.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    input.with_file_name(output_file_name(input, suffix))
}

pub fn output_path_in(output_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    output_dir.join(output_file_name(input, suffix))
}

/// Create `dir` and its parents; a no-op when it already exists.
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
}

pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).log(1024.0).floor() as usize).min(UNITS.len() - 1);
    let size = bytes as f64 / 1024_f64.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
