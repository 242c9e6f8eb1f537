use crate::error::{PairError, Result};
use crate::natural::natural_key;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file found directly inside a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
}

/// List the eligible file names in `dir`, in natural order.
///
/// Only entries directly inside `dir` are considered. Hidden names (leading
/// `.`) are skipped, as is anything that is not a regular file. Symlinks are
/// kept when they point at a regular file; the link itself is what gets
/// renamed.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    Ok(list_entries(dir)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Same as [`list_files`] but keeps the absolute path of each entry.
pub fn list_entries(dir: &Path) -> Result<Vec<FileEntry>> {
    let unreadable = |source: io::Error| PairError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(unreadable)?;
    if !metadata.is_dir() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let root = dir.canonicalize().map_err(unreadable)?;
    let mut entries = Vec::new();

    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| unreadable(io::Error::from(e)))?;

        let Some(name) = entry.file_name().to_str() else {
            eprintln!(
                "Warning: skipping file with non-UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        };

        if name.starts_with('.') || !is_regular_file(&entry) {
            continue;
        }

        entries.push(FileEntry {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
        });
    }

    entries.sort_by_cached_key(|entry| (natural_key(&entry.name), entry.name.clone()));
    Ok(entries)
}

/// Count the eligible files in `dir` without keeping their names.
pub fn count_files(dir: &Path) -> Result<usize> {
    list_entries(dir).map(|entries| entries.len())
}

fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        // Follow the link once; dangling links and links to directories are skipped
        return fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
    }
    false
}
