use crate::error::{ErrorInfo, PairError, Result};
use crate::listing::count_files;
use crate::pairing::RenamePlan;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix of the temporary names used while a batch is staged
pub const TEMP_MARKER: &str = ".pairname_tmp_";

/// Upper bound for the `" (k)"` suffix search
pub const DEFAULT_MAX_SUFFIX: u32 = 10_000;

/// Filesystem calls made by the executor.
pub trait RenameOps {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether anything (file, directory, dangling link) occupies `path`
    fn exists(&self, path: &Path) -> bool;
}

/// [`RenameOps`] backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct FsOps;

impl RenameOps for FsOps {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }
}

/// Options for executing a rename plan
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// The caller's confirmation; nothing is renamed without it
    pub confirmed: bool,
    /// Append a timestamped line per step to this file
    pub log_file: Option<PathBuf>,
    /// Highest `k` tried for a `" (k)"` suffix
    pub max_suffix: u32,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            confirmed: false,
            log_file: None,
            max_suffix: DEFAULT_MAX_SUFFIX,
        }
    }
}

impl ExecuteOptions {
    pub fn confirmed() -> Self {
        Self {
            confirmed: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Renamed to its final name
    Committed,
    /// Sitting under a temporary name
    Staged,
    /// The rename of this entry is the one that failed
    Failed,
    /// Never touched
    NeverStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Staging,
    Committing,
}

/// Where an operation ended up.
///
/// `Idle → Scanned → Staging → Committing → Done`, or `Failed` in one of the
/// two mutating phases. There is no way back to `Idle`; the caller re-scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    Idle,
    Scanned,
    Staging,
    Committing,
    Done,
    Failed(Phase),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub old_name: String,
    pub destination_name: String,
    /// The name actually committed, possibly with a disambiguation suffix
    pub final_name: Option<String>,
    /// Temporary name assigned during staging
    pub temp_name: Option<String>,
    /// Name the file carries on disk right now
    pub current_name: String,
    pub outcome: Outcome,
}

/// Result of [`execute`]: the per-entry status of every file in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub plan_id: String,
    pub target_dir: PathBuf,
    pub success: bool,
    pub state: OperationState,
    pub entries: Vec<ReportEntry>,
    pub error: Option<ErrorInfo>,
    /// Temporary files left behind that need manual cleanup
    pub residuals: Vec<PathBuf>,
}

impl ExecutionReport {
    fn new(plan: &RenamePlan) -> Self {
        let entries = plan
            .entries
            .iter()
            .map(|entry| {
                let old_name = entry.old_name();
                ReportEntry {
                    current_name: old_name.clone(),
                    old_name,
                    destination_name: entry.destination_name.clone(),
                    final_name: None,
                    temp_name: None,
                    outcome: Outcome::NeverStarted,
                }
            })
            .collect();

        Self {
            plan_id: plan.id.clone(),
            target_dir: plan.target_dir.clone(),
            success: false,
            state: OperationState::Scanned,
            entries,
            error: None,
            residuals: Vec::new(),
        }
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    /// Entries whose committed name differs from the template name
    pub fn disambiguated(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| {
            e.final_name
                .as_ref()
                .is_some_and(|name| *name != e.destination_name)
        })
    }

    /// Whether any file was left under a temporary name
    pub fn has_residual_state(&self) -> bool {
        !self.residuals.is_empty()
    }

    fn fail(
        mut self,
        state: OperationState,
        error: &PairError,
        entry: Option<usize>,
        log: &mut ExecutionLog,
    ) -> Self {
        log.log(&format!("Error: {}", error));

        self.success = false;
        self.state = state;
        self.error = Some(ErrorInfo::from_error(error, entry));
        self.residuals = self
            .entries
            .iter()
            .filter(|e| e.outcome != Outcome::Committed)
            .filter_map(|e| e.temp_name.as_ref())
            .map(|name| self.target_dir.join(name))
            .collect();

        for residual in &self.residuals {
            log.log(&format!("Left staged: {}", residual.display()));
        }
        self
    }
}

/// Step log of one execution, appended to a file when one is configured.
struct ExecutionLog {
    file: Option<File>,
}

impl ExecutionLog {
    fn open(path: Option<&Path>) -> Self {
        let file = path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!(
                        "Warning: cannot open log file {}: {}",
                        path.display(),
                        e
                    );
                    None
                },
            }
        });
        Self { file }
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.file {
            // A failing log write must not interrupt a half-finished batch
            let _ = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            );
            let _ = file.flush();
        }
    }
}

/// Execute `plan` against the real filesystem.
pub fn execute(plan: &RenamePlan, options: &ExecuteOptions) -> ExecutionReport {
    execute_with(plan, options, &mut FsOps)
}

/// Execute `plan` using the given filesystem operations.
///
/// Every file is first moved to a unique temporary name in its own directory,
/// then each temporary file is moved to its destination name in plan order.
/// A destination that is already taken, on disk or earlier in the batch, gets
/// a `" (k)"` suffix before its extension. Counts are checked before the
/// confirmation flag, so a plan over mismatched directories is refused with
/// `CountMismatch` whether or not it was confirmed. The batch stops at the first
/// failing rename and is never rolled back; the returned report holds the
/// current name of every file.
pub fn execute_with<O: RenameOps>(
    plan: &RenamePlan,
    options: &ExecuteOptions,
    ops: &mut O,
) -> ExecutionReport {
    let mut log = ExecutionLog::open(options.log_file.as_deref());
    let mut report = ExecutionReport::new(plan);

    log.log(&format!(
        "Starting plan {} ({} entries) in {}",
        plan.id,
        plan.len(),
        plan.target_dir.display()
    ));

    if let Err(e) = check_counts(plan, 0, true) {
        return report.fail(OperationState::Scanned, &e, None, &mut log);
    }

    if !options.confirmed {
        return report.fail(OperationState::Scanned, &PairError::NotConfirmed, None, &mut log);
    }

    // Phase 1: move everything out of the way
    report.state = OperationState::Staging;
    let mut staged: Vec<(usize, PathBuf)> = Vec::with_capacity(plan.len());

    for (index, entry) in plan.entries.iter().enumerate() {
        let dir = entry
            .source_path
            .parent()
            .unwrap_or(plan.target_dir.as_path());
        let temp_path = temp_path_for(dir, &report.entries[index].old_name, ops);

        if let Err(source) = ops.rename(&entry.source_path, &temp_path) {
            report.entries[index].outcome = Outcome::Failed;
            let error = PairError::StageFailed {
                path: entry.source_path.clone(),
                source,
            };
            return report.fail(
                OperationState::Failed(Phase::Staging),
                &error,
                Some(index),
                &mut log,
            );
        }

        let temp_name = file_name_of(&temp_path);
        log.log(&format!(
            "Staged {} -> {}",
            entry.source_path.display(),
            temp_name
        ));

        let report_entry = &mut report.entries[index];
        report_entry.outcome = Outcome::Staged;
        report_entry.current_name = temp_name.clone();
        report_entry.temp_name = Some(temp_name);
        staged.push((index, temp_path));
    }

    // The directories may have changed while we were staging
    report.state = OperationState::Committing;
    if let Err(e) = check_counts(plan, staged.len(), false) {
        return report.fail(
            OperationState::Failed(Phase::Committing),
            &e,
            None,
            &mut log,
        );
    }

    // Phase 2: move each staged file to its final name
    let mut used: HashSet<String> = HashSet::with_capacity(staged.len());

    for (index, temp_path) in staged {
        let destination = &plan.entries[index].destination_name;

        let final_name =
            match resolve_final_name(destination, &plan.target_dir, &used, ops, options.max_suffix)
            {
                Ok(name) => name,
                Err(e) => {
                    report.entries[index].outcome = Outcome::Failed;
                    return report.fail(
                        OperationState::Failed(Phase::Committing),
                        &e,
                        Some(index),
                        &mut log,
                    );
                },
            };

        let final_path = plan.target_dir.join(&final_name);
        if let Err(source) = ops.rename(&temp_path, &final_path) {
            report.entries[index].outcome = Outcome::Failed;
            let error = PairError::CommitFailed {
                from: temp_path,
                to: final_path,
                source,
            };
            return report.fail(
                OperationState::Failed(Phase::Committing),
                &error,
                Some(index),
                &mut log,
            );
        }

        if final_name == *destination {
            log.log(&format!("Committed {}", final_name));
        } else {
            log.log(&format!(
                "Committed {} (requested {}, name was taken)",
                final_name, destination
            ));
        }

        used.insert(final_name.clone());
        let report_entry = &mut report.entries[index];
        report_entry.outcome = Outcome::Committed;
        report_entry.current_name = final_name.clone();
        report_entry.final_name = Some(final_name);
    }

    report.state = OperationState::Done;
    report.success = true;
    log.log(&format!(
        "Plan {} completed: {} files renamed",
        plan.id,
        report.count(Outcome::Committed)
    ));
    report
}

/// Compare the current directory contents against the plan.
///
/// `staged` files are hidden under temporary names and are added back to the
/// target count. Before staging, unequal counts are refused outright.
fn check_counts(plan: &RenamePlan, staged: usize, refuse_mismatch: bool) -> Result<()> {
    let current_target = count_files(&plan.target_dir)? + staged;
    let current_template = count_files(&plan.template_dir)?;

    if refuse_mismatch && current_target != current_template {
        return Err(PairError::CountMismatch {
            target_count: current_target,
            template_count: current_template,
        });
    }

    if current_target != plan.target_count || current_template != plan.template_count {
        return Err(PairError::PlanStale {
            planned_target: plan.target_count,
            planned_template: plan.template_count,
            current_target,
            current_template,
        });
    }

    Ok(())
}

fn temp_path_for<O: RenameOps>(dir: &Path, old_name: &str, ops: &O) -> PathBuf {
    let (_, extension) = split_extension(old_name);
    loop {
        let candidate = dir.join(format!(
            "{}{}{}",
            TEMP_MARKER,
            Uuid::new_v4().simple(),
            extension
        ));
        if !ops.exists(&candidate) {
            return candidate;
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pick the name `destination` will be committed under.
///
/// The name is free when no earlier entry of the batch used it and nothing
/// exists at `dir/name`. Otherwise `" (1)"`, `" (2)"`, ... is inserted before
/// the extension, up to `max_suffix`.
pub fn resolve_final_name<O: RenameOps>(
    destination: &str,
    dir: &Path,
    used: &HashSet<String>,
    ops: &O,
    max_suffix: u32,
) -> Result<String> {
    let is_taken = |name: &str| used.contains(name) || ops.exists(&dir.join(name));

    if !is_taken(destination) {
        return Ok(destination.to_string());
    }

    let (stem, extension) = split_extension(destination);
    for k in 1..=max_suffix {
        let candidate = format!("{} ({}){}", stem, k, extension);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(PairError::NameCollisionExhausted {
        name: destination.to_string(),
        attempts: max_suffix,
    })
}

/// Split a file name into stem and extension (with its dot).
///
/// The extension starts at the last `.` that has a non-dot character before
/// it, so `.bashrc` has none and `archive.tar.gz` has `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name.rfind('.') {
        Some(dot) if dot > leading_dots => name.split_at(dot),
        _ => (name, ""),
    }
}
