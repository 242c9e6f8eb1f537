use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename the files in one directory after the files in another, paired by natural sort order
#[derive(Parser, Debug)]
#[command(name = "pairname")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "PAIRNAME_YES")]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pair the two directories and show the renames without touching any file
    Plan {
        /// Directory whose files get renamed
        target: PathBuf,

        /// Directory whose file names are copied
        template: PathBuf,

        /// Preview output format (defaults to config or table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths in table output
        #[arg(long)]
        fixed_table_width: bool,

        /// Save the plan as JSON for a later `pairname apply`
        #[arg(long)]
        plan_out: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Pair the two directories and rename the target files
    Rename {
        /// Directory whose files get renamed
        target: PathBuf,

        /// Directory whose file names are copied
        template: PathBuf,

        /// Preview output format (defaults to config or table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show the plan and stop
        #[arg(long)]
        dry_run: bool,

        /// Append a timestamped log of every rename to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },

    /// Execute a plan saved with `pairname plan --plan-out`
    Apply {
        /// Path to the saved plan
        plan: PathBuf,

        /// Preview output format (defaults to config or table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Append a timestamped log of every rename to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },

    /// Look for temporary files left behind by an interrupted rename
    Status {
        /// Directory to inspect
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
