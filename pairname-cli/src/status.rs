use anyhow::{Context, Result};
use pairname_core::{status_operation, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_status(dir: &Path, output: OutputFormat) -> Result<()> {
    let status = status_operation(dir)
        .with_context(|| format!("Failed to get status of {}", dir.display()))?;

    print!("{}", status.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
