use crate::error::{PairError, Result};
use crate::executor::TEMP_MARKER;
use crate::natural::natural_key;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find files in `dir` still carrying a staging name from an interrupted batch.
pub fn find_residuals(dir: &Path) -> Result<Vec<PathBuf>> {
    let unreadable = |source: io::Error| PairError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    if !fs::metadata(dir).map_err(unreadable)?.is_dir() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let mut residuals = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| unreadable(io::Error::from(e)))?;
        let is_staged = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(TEMP_MARKER));
        if is_staged && !entry.file_type().is_dir() {
            residuals.push(entry.into_path());
        }
    }

    residuals.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (natural_key(&name), name)
    });
    Ok(residuals)
}
