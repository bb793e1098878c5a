use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Error;

/// The input must exist and be a regular file.
pub fn check_input(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::Path(format!(
            "Input file \"{}\" does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Error::Path(format!(
            "Input file \"{}\" is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// The output must not be a directory and its parent directory must exist.
pub fn check_output(path: &Path) -> Result<(), Error> {
    if path.is_dir() || path.as_os_str().to_string_lossy().ends_with('/') {
        return Err(Error::Path(format!(
            "Output file \"{}\" is a directory",
            path.display()
        )));
    }
    if !parent(path).is_dir() {
        return Err(Error::Path(format!(
            "Base directory for output file \"{}\" does not exist",
            path.display()
        )));
    }
    Ok(())
}

fn parent(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Splits `out.txt` into `("out", ".txt")`.
fn split_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// Smallest `n` above every `stem(n)ext` already in `names`, starting at 1.
pub fn next_copy_index<'a, I>(stem: &str, ext: &str, names: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| name.strip_prefix(stem)?.strip_prefix('(')?.strip_suffix(ext))
        .filter_map(|rest| rest.strip_suffix(')')?.parse::<usize>().ok())
        .map(|n| n + 1)
        .fold(1, usize::max)
}

/// Where to write when `path` already exists and both files are kept.
pub fn keep_both(path: &Path) -> Result<PathBuf, Error> {
    let (stem, ext) = split_name(path);
    let mut names = vec![];
    for entry in fs::read_dir(parent(path))? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    let n = next_copy_index(&stem, &ext, names.iter().map(String::as_str));
    let renamed = path.with_file_name(format!("{}({}){}", stem, n, ext));
    debug!("keeping {}, writing {}", path.display(), renamed.display());
    Ok(renamed)
}
