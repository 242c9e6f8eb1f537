use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while listing, pairing or renaming.
///
/// Listing and pairing errors (`DirectoryUnreadable`, `EmptyListing`,
/// `CountMismatch`) happen before anything on disk is touched. The staging and
/// commit errors are reported after some files may already have been renamed;
/// the `ExecutionReport` that carries them lists the current name of every
/// file.
#[derive(Debug, Error)]
pub enum PairError {
    #[error("cannot read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no files found in {}", path.display())]
    EmptyListing { path: PathBuf },

    #[error("file counts differ: target={target_count}, template={template_count}")]
    CountMismatch {
        target_count: usize,
        template_count: usize,
    },

    #[error(
        "directory contents changed since the plan was made \
         (planned target={planned_target}, template={planned_template}; \
         now target={current_target}, template={current_template})"
    )]
    PlanStale {
        planned_target: usize,
        planned_template: usize,
        current_target: usize,
        current_template: usize,
    },

    #[error("failed to stage {}: {source}", path.display())]
    StageFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    CommitFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no free name for '{name}' after {attempts} suffix attempts")]
    NameCollisionExhausted { name: String, attempts: u32 },

    #[error("rename was not confirmed")]
    NotConfirmed,

    #[error(
        "another pairname process is already running (PID: {pid}). \
         If this is incorrect, remove the lock file at: {}",
        path.display()
    )]
    Locked { pid: u32, path: PathBuf },

    #[error("cannot use plan file {}: {message}", path.display())]
    PlanFile { path: PathBuf, message: String },
}

impl PairError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryUnreadable { .. } => ErrorKind::DirectoryUnreadable,
            Self::EmptyListing { .. } => ErrorKind::EmptyListing,
            Self::CountMismatch { .. } => ErrorKind::CountMismatch,
            Self::PlanStale { .. } => ErrorKind::PlanStale,
            Self::StageFailed { .. } => ErrorKind::StageFailed,
            Self::CommitFailed { .. } => ErrorKind::CommitFailed,
            Self::NameCollisionExhausted { .. } => ErrorKind::NameCollisionExhausted,
            Self::NotConfirmed => ErrorKind::NotConfirmed,
            Self::Locked { .. } => ErrorKind::Locked,
            Self::PlanFile { .. } => ErrorKind::PlanFile,
        }
    }

    /// Whether this error can only be raised after files were renamed.
    pub fn leaves_residual_state(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StageFailed | ErrorKind::CommitFailed | ErrorKind::NameCollisionExhausted
        )
    }
}

/// Serializable discriminant of [`PairError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DirectoryUnreadable,
    EmptyListing,
    CountMismatch,
    PlanStale,
    StageFailed,
    CommitFailed,
    NameCollisionExhausted,
    NotConfirmed,
    Locked,
    PlanFile,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectoryUnreadable => "DirectoryUnreadable",
            Self::EmptyListing => "EmptyListing",
            Self::CountMismatch => "CountMismatch",
            Self::PlanStale => "PlanStale",
            Self::StageFailed => "StageFailed",
            Self::CommitFailed => "CommitFailed",
            Self::NameCollisionExhausted => "NameCollisionExhausted",
            Self::NotConfirmed => "NotConfirmed",
            Self::Locked => "Locked",
            Self::PlanFile => "PlanFile",
        };
        f.write_str(name)
    }
}

/// Error descriptor carried by an `ExecutionReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Index of the plan entry being processed when the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
}

impl ErrorInfo {
    pub fn from_error(error: &PairError, entry: Option<usize>) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            entry,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ErrorInfo {}

pub type Result<T, E = PairError> = std::result::Result<T, E>;
