//! High-level operations that correspond to CLI commands
//!
//! These modules contain what each pairname command does, separated from CLI
//! concerns like argument parsing, prompting and output formatting.

pub mod apply;
pub mod plan;
pub mod rename;
pub mod status;

pub use apply::{apply_operation, execute_operation};
pub use plan::plan_operation;
pub use rename::{rename_operation, RenameOutcome};
pub use status::status_operation;
