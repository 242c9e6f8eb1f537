use crate::executor::{execute, ExecuteOptions, ExecutionReport};
use crate::lock::LockFile;
use crate::pairing::{load_plan, RenamePlan};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute `plan` while holding the lock on its target directory.
///
/// An unconfirmed plan is refused before anything is touched, so no lock is
/// taken for it.
pub fn execute_operation(plan: &RenamePlan, options: &ExecuteOptions) -> Result<ExecutionReport> {
    if !options.confirmed {
        return Ok(execute(plan, options));
    }

    let lock = LockFile::acquire(&plan.target_dir).with_context(|| {
        format!(
            "Failed to acquire lock for {}",
            plan.target_dir.display()
        )
    })?;

    let report = execute(plan, options);

    if let Err(e) = lock.release() {
        eprintln!("Warning: failed to release lock: {e:#}");
    }

    Ok(report)
}

/// High-level apply operation - equivalent to `pairname apply` command
///
/// Loads a plan saved by `pairname plan --plan-out`, hands it to `confirm`
/// and executes it. The answer of `confirm` overrides `options.confirmed`.
/// The executor recounts both directories first, so a plan saved before the
/// directories changed is refused as stale.
pub fn apply_operation<F>(
    plan_path: &Path,
    options: &ExecuteOptions,
    confirm: F,
) -> Result<(RenamePlan, ExecutionReport)>
where
    F: FnOnce(&RenamePlan) -> Result<bool>,
{
    let plan = load_plan(plan_path)?;

    let options = ExecuteOptions {
        confirmed: confirm(&plan)?,
        ..options.clone()
    };

    let report = execute_operation(&plan, &options)?;
    Ok((plan, report))
}
