use std::path::{Path, PathBuf};

/// Default output workbook next to the input: `{stem}_clean.xlsx`
///
/// Works for both workbook files and CSV directories.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "stations".to_string());

    let filename = format!("{}_clean.xlsx", stem);
    match input.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    }
}
