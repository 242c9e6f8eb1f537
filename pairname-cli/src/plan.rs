use anyhow::Result;
use pairname_core::{plan_operation, render_plan_with_fixed_width, OutputFormatter, Preview};
use std::path::{Path, PathBuf};

use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    target: &Path,
    template: &Path,
    preview: Preview,
    fixed_table_width: bool,
    plan_out: Option<PathBuf>,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let result = plan_operation(target, template, plan_out.as_deref())?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                let rendered = render_plan_with_fixed_width(
                    &result.plan,
                    preview,
                    Some(use_color),
                    fixed_table_width,
                );
                if !rendered.is_empty() {
                    println!("{}", rendered.trim_end());
                    println!();
                }
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
