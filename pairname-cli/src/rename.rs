use anyhow::{Context, Result};
use pairname_core::{
    plan_operation, rename_operation, render_report, write_preview, ExecuteOptions,
    ExecutionReport, OperationState, OutputFormatter, Preview, RenamePlan,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    target: &Path,
    template: &Path,
    preview: Preview,
    dry_run: bool,
    options: &ExecuteOptions,
    yes: bool,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let show_text = output == OutputFormat::Summary && !quiet;

    if dry_run {
        let planned = plan_operation(target, template, None)?;
        match output {
            OutputFormat::Json => println!("{}", planned.format_json()),
            OutputFormat::Summary if !quiet => {
                write_preview(&planned.plan, preview, Some(use_color))?;
                print!("{}", planned.format_summary());
            },
            OutputFormat::Summary => {},
        }
        return Ok(());
    }

    let outcome = rename_operation(target, template, options, |planned| {
        if show_text {
            write_preview(&planned.plan, preview, Some(use_color))?;
            print!("{}", planned.format_summary());
        }
        confirm(&planned.plan, yes)
    })?;

    finish_report(&outcome.report, use_color, output, quiet)
}

/// Ask before renaming, unless `--yes` was given or nothing would change.
pub fn confirm(plan: &RenamePlan, yes: bool) -> Result<bool> {
    // The executor refuses a mismatched plan, no point in asking
    if plan.mismatch().is_some() {
        return Ok(false);
    }
    if plan.changes() == 0 || yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        eprintln!("Not a terminal, pass --yes to rename without confirmation");
        return Ok(false);
    }
    confirm_with_input(&mut io::stdin())
}

fn confirm_with_input<R: io::Read>(reader: &mut R) -> Result<bool> {
    print!("Rename these files? [y/N]: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::BufReader::new(reader)
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}

/// Print an execution report and turn a failed run into an error.
pub fn finish_report(
    report: &ExecutionReport,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", report.format_json()),
        // A run refused before staging has nothing to list
        OutputFormat::Summary if !quiet && report.state != OperationState::Scanned => {
            print!("{}", render_report(report, use_color));
        },
        OutputFormat::Summary => {},
    }

    match report.error {
        Some(ref error) if !report.success => Err(error.clone().into()),
        _ => Ok(()),
    }
}
