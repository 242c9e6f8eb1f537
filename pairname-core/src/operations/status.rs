use crate::listing::count_files;
use crate::lock::LOCK_FILE_NAME;
use crate::output::StatusResult;
use crate::residuals::find_residuals;
use anyhow::Result;
use std::path::Path;

/// High-level status operation - equivalent to `pairname status` command
///
/// Reports leftovers of an interrupted rename in `dir`.
pub fn status_operation(dir: &Path) -> Result<StatusResult> {
    let residuals = find_residuals(dir)?;
    let file_count = count_files(dir)?;

    Ok(StatusResult {
        directory: dir.to_path_buf(),
        file_count,
        residuals,
        locked: dir.join(LOCK_FILE_NAME).exists(),
    })
}
