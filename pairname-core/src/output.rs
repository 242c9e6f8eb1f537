use crate::executor::{ExecutionReport, Outcome};
use crate::pairing::{CountMismatch, RenamePlan};
use crate::preview::render_report;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub plan: RenamePlan,
    pub mismatch: Option<CountMismatch>,
    pub count_message: String,
    /// Where the plan was saved, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_path: Option<PathBuf>,
}

/// Result of a status operation
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResult {
    pub directory: PathBuf,
    pub file_count: usize,
    pub residuals: Vec<PathBuf>,
    pub locked: bool,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "plan_id": self.plan.id,
            "counts": self.count_message,
            "mismatch": self.mismatch,
            "plan_path": self.plan_path,
            "pairs": self.plan.entries.iter().map(|entry| json!({
                "old_name": entry.old_name(),
                "new_name": entry.destination_name,
            })).collect::<Vec<_>>(),
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Pairname plan: {} -> {}",
            self.plan.target_dir.display(),
            self.plan.template_dir.display()
        )
        .unwrap();
        writeln!(output, "Counts: {}", self.count_message).unwrap();
        writeln!(
            output,
            "Renames: {} of {} pairs",
            self.plan.changes(),
            self.plan.len()
        )
        .unwrap();

        if let Some(mismatch) = self.mismatch {
            writeln!(
                output,
                "Warning: target has {} files but template has {}; only the first {} are paired and the rename will be refused",
                mismatch.target_count,
                mismatch.template_count,
                self.plan.len()
            )
            .unwrap();
        }

        if let Some(ref path) = self.plan_path {
            writeln!(output, "Plan saved to: {}", path.display()).unwrap();
        }

        output
    }
}

impl OutputFormatter for ExecutionReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.success,
            "operation": "rename",
            "plan_id": self.plan_id,
            "state": self.state,
            "summary": {
                "committed": self.count(Outcome::Committed),
                "staged": self.count(Outcome::Staged),
                "failed": self.count(Outcome::Failed),
                "never_started": self.count(Outcome::NeverStarted),
            },
            "entries": self.entries,
            "error": self.error,
            "residuals": self.residuals,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        render_report(self, false)
    }
}

impl OutputFormatter for StatusResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "status",
            "directory": self.directory,
            "file_count": self.file_count,
            "residuals": self.residuals,
            "locked": self.locked,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Directory: {}", self.directory.display()).unwrap();
        writeln!(output, "Files: {}", self.file_count).unwrap();

        if self.locked {
            writeln!(output, "A rename is in progress (lock file present)").unwrap();
        }

        if self.residuals.is_empty() {
            writeln!(output, "No leftover temporary files").unwrap();
        } else {
            writeln!(
                output,
                "Leftover temporary files from an interrupted rename: {}",
                self.residuals.len()
            )
            .unwrap();
            for residual in &self.residuals {
                writeln!(output, "  {}", residual.display()).unwrap();
            }
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
