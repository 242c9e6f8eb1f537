use anyhow::{Context, Result};
use clap::Parser;
use pairname_core::{
    should_use_color, Config, ErrorInfo, ErrorKind, ExecuteOptions, OutputFormatter, PairError,
    Preview, VersionResult,
};
use std::path::PathBuf;
use std::process;

mod apply;
mod cli;
mod plan;
mod rename;
mod status;

use cli::{Cli, Commands, OutputFormat, PreviewArg};

fn main() {
    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring config: {e:#}");
            Config::default()
        },
    };
    let use_color = !cli.no_color && should_use_color(config.defaults.use_color);

    let result = match cli.command {
        Commands::Plan {
            target,
            template,
            preview,
            fixed_table_width,
            plan_out,
            output,
            quiet,
        } => {
            let format = preview_format(preview, &config, quiet);
            plan::handle_plan(
                &target,
                &template,
                format,
                fixed_table_width,
                plan_out,
                use_color,
                output,
                quiet,
            )
        },

        Commands::Rename {
            target,
            template,
            preview,
            dry_run,
            log_file,
            output,
            quiet,
        } => {
            let format = preview_format(preview, &config, quiet);
            let options = execute_options(&config, log_file);
            rename::handle_rename(
                &target, &template, format, dry_run, &options, cli.yes, use_color, output, quiet,
            )
        },

        Commands::Apply {
            plan,
            preview,
            log_file,
            output,
            quiet,
        } => {
            let format = preview_format(preview, &config, quiet);
            let options = execute_options(&config, log_file);
            apply::handle_apply(&plan, format, &options, cli.yes, use_color, output, quiet)
        },

        Commands::Status { dir, output } => status::handle_status(&dir, output),

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// CLI flag first, then the config default; `--quiet` always wins.
fn preview_format(preview: Option<PreviewArg>, config: &Config, quiet: bool) -> Preview {
    if quiet {
        return Preview::None;
    }
    preview
        .or_else(|| PreviewArg::from_str(&config.defaults.preview_format))
        .map_or(Preview::Table, Preview::from)
}

fn execute_options(config: &Config, log_file: Option<PathBuf>) -> ExecuteOptions {
    ExecuteOptions {
        confirmed: false,
        log_file: log_file.or_else(|| config.defaults.log_file.clone()),
        max_suffix: config.defaults.max_suffix,
    }
}

fn error_kind(error: &anyhow::Error) -> Option<ErrorKind> {
    error
        .downcast_ref::<PairError>()
        .map(PairError::kind)
        .or_else(|| error.downcast_ref::<ErrorInfo>().map(|info| info.kind))
}

/// 1 = refused, 2 = invalid input, 3 = files may be left under temporary names
fn exit_code(error: &anyhow::Error) -> i32 {
    match error_kind(error) {
        Some(ErrorKind::CountMismatch | ErrorKind::PlanStale | ErrorKind::Locked) => 1,
        Some(
            ErrorKind::DirectoryUnreadable
            | ErrorKind::EmptyListing
            | ErrorKind::NotConfirmed
            | ErrorKind::PlanFile,
        ) => 2,
        Some(
            ErrorKind::StageFailed | ErrorKind::CommitFailed | ErrorKind::NameCollisionExhausted,
        )
        | None => 3,
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "pairname".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}
