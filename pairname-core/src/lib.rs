#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Rename the files of one directory after the files of another.
//!
//! Both directories are listed in natural order and paired by position; the
//! n-th target file takes the name of the n-th template file. Renames go
//! through temporary names first so that swaps and cycles never overwrite a
//! file.

pub mod config;
pub mod error;
pub mod executor;
pub mod listing;
pub mod lock;
pub mod natural;
pub mod operations;
pub mod output;
pub mod pairing;
pub mod preview;
pub mod residuals;

pub use config::Config;
pub use error::{ErrorInfo, ErrorKind, PairError};
pub use executor::{
    execute, execute_with, ExecuteOptions, ExecutionReport, FsOps, OperationState, Outcome,
    Phase, RenameOps, ReportEntry,
};
pub use listing::{count_files, list_entries, list_files, FileEntry};
pub use lock::LockFile;
pub use natural::{natural_cmp, natural_key, sort_natural, NaturalKey};
pub use operations::{
    apply_operation, execute_operation, plan_operation, rename_operation, status_operation,
    RenameOutcome,
};
pub use output::{OutputFormat, OutputFormatter, PlanResult, StatusResult, VersionResult};
pub use pairing::{load_plan, pair, write_plan, CountMismatch, PairingEntry, RenamePlan};
pub use preview::{
    render_plan, render_plan_with_fixed_width, render_report, should_use_color, write_preview,
    Preview,
};
pub use residuals::find_residuals;
