use crate::error::{PairError, Result};
use crate::listing::list_entries;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// One matched pair: a target file and the template name it will take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingEntry {
    pub source_path: PathBuf,
    /// Verbatim template file name, extension included
    pub destination_name: String,
}

impl PairingEntry {
    /// File name of `source_path`
    pub fn old_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the file already carries its destination name
    pub fn is_unchanged(&self) -> bool {
        self.old_name() == self.destination_name
    }
}

/// Advisory signal that the two directories hold different numbers of files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    pub target_count: usize,
    pub template_count: usize,
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mismatch: target={}, template={}",
            self.target_count, self.template_count
        )
    }
}

impl From<CountMismatch> for PairError {
    fn from(mismatch: CountMismatch) -> Self {
        Self::CountMismatch {
            target_count: mismatch.target_count,
            template_count: mismatch.template_count,
        }
    }
}

/// An ordered set of renames produced by a scan.
///
/// `entries` holds `min(target_count, template_count)` pairs. The counts are
/// the ones observed at scan time; the executor compares them against the
/// directories again before it touches anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub id: String,
    pub created_at: String,
    pub target_dir: PathBuf,
    pub template_dir: PathBuf,
    pub target_count: usize,
    pub template_count: usize,
    pub entries: Vec<PairingEntry>,
    pub version: String,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mismatch(&self) -> Option<CountMismatch> {
        (self.target_count != self.template_count).then_some(CountMismatch {
            target_count: self.target_count,
            template_count: self.template_count,
        })
    }

    /// `"equal: N"` or `"mismatch: target=T, template=M"`
    pub fn count_message(&self) -> String {
        match self.mismatch() {
            Some(mismatch) => mismatch.to_string(),
            None => format!("equal: {}", self.target_count),
        }
    }

    /// Number of entries whose name would actually change
    pub fn changes(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_unchanged()).count()
    }

    /// Check that every entry renames a file inside `target_dir` to a plain
    /// file name in the same directory.
    pub fn check_entries(&self) -> std::result::Result<(), String> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.source_path.parent() != Some(self.target_dir.as_path()) {
                return Err(format!(
                    "entry {}: {} is not inside {}",
                    index,
                    entry.source_path.display(),
                    self.target_dir.display()
                ));
            }
            if !is_plain_file_name(&entry.destination_name) {
                return Err(format!(
                    "entry {}: '{}' is not a plain file name",
                    index, entry.destination_name
                ));
            }
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

/// Pair the files of `target_dir` with the names in `template_dir`.
///
/// Both listings are naturally sorted and zipped position by position. When
/// the counts differ the plan covers the shorter listing and the mismatch is
/// returned alongside it; executing such a plan is refused later.
pub fn pair(
    target_dir: &Path,
    template_dir: &Path,
) -> Result<(RenamePlan, Option<CountMismatch>)> {
    let targets = list_entries(target_dir)?;
    let templates = list_entries(template_dir)?;

    if targets.is_empty() {
        return Err(PairError::EmptyListing {
            path: target_dir.to_path_buf(),
        });
    }
    if templates.is_empty() {
        return Err(PairError::EmptyListing {
            path: template_dir.to_path_buf(),
        });
    }

    let target_count = targets.len();
    let template_count = templates.len();

    let entries: Vec<PairingEntry> = targets
        .into_iter()
        .zip(templates)
        .map(|(target, template)| PairingEntry {
            source_path: target.path,
            destination_name: template.name,
        })
        .collect();

    let target_dir = canonical_or_given(target_dir);
    let template_dir = canonical_or_given(template_dir);

    let plan = RenamePlan {
        id: generate_plan_id(&target_dir, &template_dir),
        created_at: chrono::Local::now().to_rfc3339(),
        target_dir,
        template_dir,
        target_count,
        template_count,
        entries,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mismatch = plan.mismatch();
    Ok((plan, mismatch))
}

fn canonical_or_given(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

fn generate_plan_id(target_dir: &Path, template_dir: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(target_dir.to_string_lossy().as_bytes());
    hasher.update(template_dir.to_string_lossy().as_bytes());
    hasher.update(
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default()
            .to_string()
            .as_bytes(),
    );
    format!("{:x}", hasher.finalize())[..16].to_string()
}

/// Save a plan as pretty-printed JSON.
pub fn write_plan(plan: &RenamePlan, path: &Path) -> Result<()> {
    let plan_file_error = |message: String| PairError::PlanFile {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| plan_file_error(e.to_string()))?;
    }

    let file = File::create(path).map_err(|e| plan_file_error(e.to_string()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, plan).map_err(|e| plan_file_error(e.to_string()))?;
    Ok(())
}

/// Load a plan previously saved with [`write_plan`].
pub fn load_plan(path: &Path) -> Result<RenamePlan> {
    let content = fs::read_to_string(path).map_err(|e| PairError::PlanFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let plan: RenamePlan = serde_json::from_str(&content).map_err(|e| PairError::PlanFile {
        path: path.to_path_buf(),
        message: format!("invalid plan: {}", e),
    })?;

    plan.check_entries().map_err(|message| PairError::PlanFile {
        path: path.to_path_buf(),
        message: format!("invalid plan: {}", message),
    })?;
    Ok(plan)
}
