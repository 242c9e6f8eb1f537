use crate::executor::{ExecuteOptions, ExecutionReport};
use crate::operations::{execute_operation, plan_operation};
use crate::output::PlanResult;
use anyhow::Result;
use std::path::Path;

/// What a scan-and-rename run produced
#[derive(Debug)]
pub struct RenameOutcome {
    pub planned: PlanResult,
    pub report: ExecutionReport,
}

/// High-level rename operation - equivalent to `pairname rename` command
///
/// Scans both directories, hands the plan to `confirm` and executes it. The
/// answer of `confirm` overrides `options.confirmed`. A plan over directories
/// with different file counts is refused by the executor, so `confirm` can
/// show the preview and return `false` without asking.
pub fn rename_operation<F>(
    target_dir: &Path,
    template_dir: &Path,
    options: &ExecuteOptions,
    confirm: F,
) -> Result<RenameOutcome>
where
    F: FnOnce(&PlanResult) -> Result<bool>,
{
    let planned = plan_operation(target_dir, template_dir, None)?;

    let options = ExecuteOptions {
        confirmed: confirm(&planned)?,
        ..options.clone()
    };

    let report = execute_operation(&planned.plan, &options)?;
    Ok(RenameOutcome { planned, report })
}
