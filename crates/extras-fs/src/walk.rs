//! Recursive directory traversal and numeric-aware name ordering

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// Visit every file below `dir`, depth-first, with the file and its parent.
///
/// Directories are descended into but not reported. Symbolic links are not
/// followed. The first I/O failure aborts the walk.
pub fn walk<F>(dir: &NormalizedPath, visit: F) -> Result<()>
where
    F: FnMut(&NormalizedPath, &NormalizedPath),
{
    walk_entries(dir, false, visit)
}

/// Like [`walk`], visiting siblings in [`compare_by_number`] order.
pub fn walk_sorted<F>(dir: &NormalizedPath, visit: F) -> Result<()>
where
    F: FnMut(&NormalizedPath, &NormalizedPath),
{
    walk_entries(dir, true, visit)
}

/// Every file path below `root`.
///
/// A missing root yields an empty list rather than an error.
pub fn tree(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    collect(root, false)
}

/// Like [`tree`], with siblings in [`compare_by_number`] order.
pub fn tree_sorted(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    collect(root, true)
}

/// Immediate entries of `dir`, files and directories, in numeric-aware order.
pub fn list_dir(dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let native = dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    sort_by_number(&mut names);

    Ok(names.iter().map(|name| dir.join(name)).collect())
}

/// Order names by their leading decimal number, then by full text.
///
/// `2-b` sorts before `10-a`. Names with a numeric prefix sort before names
/// without one, and names without one compare lexically.
pub fn compare_by_number(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => compare_digits(x, y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort in place with [`compare_by_number`].
pub fn sort_by_number<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| compare_by_number(a.as_ref(), b.as_ref()));
}

/// Sort in place with a caller-supplied comparator.
pub fn sort_by_number_with<S, F>(items: &mut [S], compare: F)
where
    F: FnMut(&S, &S) -> Ordering,
{
    items.sort_by(compare);
}

fn collect(root: &NormalizedPath, sorted: bool) -> Result<Vec<NormalizedPath>> {
    if !root.exists() {
        tracing::debug!(root = %root, "Tree root does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    walk_entries(root, sorted, |file, _| files.push(file.clone()))?;
    Ok(files)
}

fn walk_entries<F>(dir: &NormalizedPath, sorted: bool, mut visit: F) -> Result<()>
where
    F: FnMut(&NormalizedPath, &NormalizedPath),
{
    let native = dir.to_native();
    let metadata = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
    if !metadata.is_dir() {
        return Err(Error::io(
            &native,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let mut walker = WalkDir::new(&native).min_depth(1).follow_links(false);
    if sorted {
        walker = walker.sort_by(|a, b| {
            compare_by_number(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
        });
    }

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(&native, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let file = NormalizedPath::new(entry.path());
        let parent = entry
            .path()
            .parent()
            .map(NormalizedPath::new)
            .unwrap_or_else(|| dir.clone());
        visit(&file, &parent);
    }

    Ok(())
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    Error::io(path, std::io::Error::from(err))
}

fn leading_number(name: &str) -> Option<&str> {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    (end > 0).then(|| &name[..end])
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
