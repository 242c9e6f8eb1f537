use crate::output::PlanResult;
use crate::pairing::{pair, write_plan};
use anyhow::{Context, Result};
use std::path::Path;

/// High-level plan operation - equivalent to `pairname plan` command
///
/// Scans both directories and pairs them. Nothing is renamed. When `plan_out`
/// is given the plan is also saved there for a later `pairname apply`.
pub fn plan_operation(
    target_dir: &Path,
    template_dir: &Path,
    plan_out: Option<&Path>,
) -> Result<PlanResult> {
    let (plan, mismatch) = pair(target_dir, template_dir).with_context(|| {
        format!(
            "Failed to pair {} with {}",
            target_dir.display(),
            template_dir.display()
        )
    })?;

    if let Some(path) = plan_out {
        write_plan(&plan, path)?;
    }

    Ok(PlanResult {
        count_message: plan.count_message(),
        mismatch,
        plan,
        plan_path: plan_out.map(Path::to_path_buf),
    })
}
