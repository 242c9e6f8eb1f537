use anyhow::Result;
use pairname_core::{apply_operation, write_preview, ExecuteOptions, Preview};
use std::path::Path;

use crate::rename::{confirm, finish_report};
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_apply(
    plan_path: &Path,
    preview: Preview,
    options: &ExecuteOptions,
    yes: bool,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let show_text = output == OutputFormat::Summary && !quiet;

    let (_, report) = apply_operation(plan_path, options, |plan| {
        if show_text {
            write_preview(plan, preview, Some(use_color))?;
        }
        confirm(plan, yes)
    })?;

    finish_report(&report, use_color, output, quiet)
}
