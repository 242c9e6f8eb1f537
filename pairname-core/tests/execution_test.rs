use pairname_core::{
    execute, execute_with, find_residuals, list_files, pair, status_operation, ErrorKind,
    ExecuteOptions, FsOps, OperationState, Outcome, Phase, RenameOps,
};
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

fn dir_with(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        fs::write(temp_dir.path().join(name), format!("content of {}", name)).unwrap();
    }
    temp_dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// Real filesystem, except that the n-th rename fails with permission denied.
struct DenyNthRename {
    n: usize,
    calls: usize,
}

impl RenameOps for DenyNthRename {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self.calls += 1;
        if self.calls == self.n {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        FsOps.rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        FsOps.exists(path)
    }
}

#[test]
fn test_rename_preserves_content() {
    let target = dir_with(&["b.txt", "a.txt", "c.txt"]);
    let template = dir_with(&["x.png", "y.png", "z.png"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    let report = execute(&plan, &ExecuteOptions::confirmed());

    assert!(report.success);
    assert_eq!(report.state, OperationState::Done);
    assert_eq!(list_files(target.path()).unwrap(), vec!["x.png", "y.png", "z.png"]);
    assert_eq!(read(target.path(), "x.png"), "content of a.txt");
    assert_eq!(read(target.path(), "y.png"), "content of b.txt");
    assert_eq!(read(target.path(), "z.png"), "content of c.txt");
    // template is never touched
    assert_eq!(list_files(template.path()).unwrap(), vec!["x.png", "y.png", "z.png"]);
    assert!(find_residuals(target.path()).unwrap().is_empty());
}

#[test]
fn test_cycle_of_names() {
    // 1 -> 2, 2 -> 3, 3 -> 1 after natural sort of both sides
    let target = dir_with(&["n1", "n2", "n3"]);
    let template = TempDir::new().unwrap();
    for name in ["n2", "n3", "n1"] {
        fs::write(template.path().join(name), "").unwrap();
    }

    let (mut plan, _) = pair(target.path(), template.path()).unwrap();
    plan.entries[0].destination_name = "n2".to_string();
    plan.entries[1].destination_name = "n3".to_string();
    plan.entries[2].destination_name = "n1".to_string();

    let report = execute(&plan, &ExecuteOptions::confirmed());

    assert!(report.success);
    assert_eq!(report.disambiguated().count(), 0);
    assert_eq!(read(target.path(), "n2"), "content of n1");
    assert_eq!(read(target.path(), "n3"), "content of n2");
    assert_eq!(read(target.path(), "n1"), "content of n3");
}

#[test]
fn test_second_run_changes_nothing() {
    let target = dir_with(&["IMG_2.jpg", "IMG_10.jpg", "IMG_1.jpg"]);
    let template = dir_with(&["c.jpg", "a.jpg", "b.jpg"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    assert!(execute(&plan, &ExecuteOptions::confirmed()).success);

    let (again, mismatch) = pair(target.path(), template.path()).unwrap();
    assert!(mismatch.is_none());
    assert_eq!(again.changes(), 0);

    let report = execute(&again, &ExecuteOptions::confirmed());
    assert!(report.success);
    assert_eq!(report.disambiguated().count(), 0);
    assert_eq!(read(target.path(), "a.jpg"), "content of IMG_1.jpg");
    assert_eq!(read(target.path(), "c.jpg"), "content of IMG_10.jpg");
}

#[test]
fn test_duplicate_destination_gets_suffix() {
    let target = dir_with(&["1.txt", "2.txt"]);
    let template = dir_with(&["a.txt", "b.txt"]);

    let (mut plan, _) = pair(target.path(), template.path()).unwrap();
    plan.entries[1].destination_name = "a.txt".to_string();

    let report = execute(&plan, &ExecuteOptions::confirmed());

    assert!(report.success);
    assert_eq!(report.entries[0].final_name.as_deref(), Some("a.txt"));
    assert_eq!(report.entries[1].final_name.as_deref(), Some("a (1).txt"));
    assert_eq!(read(target.path(), "a (1).txt"), "content of 2.txt");
}

#[test]
fn test_stage_failure_on_third_of_five() {
    let names = ["1.txt", "2.txt", "3.txt", "4.txt", "5.txt"];
    let target = dir_with(&names);
    let template = dir_with(&["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    let report = execute_with(
        &plan,
        &ExecuteOptions::confirmed(),
        &mut DenyNthRename { n: 3, calls: 0 },
    );

    assert!(!report.success);
    assert_eq!(report.state, OperationState::Failed(Phase::Staging));
    let outcomes: Vec<Outcome> = report.entries.iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        [
            Outcome::Staged,
            Outcome::Staged,
            Outcome::Failed,
            Outcome::NeverStarted,
            Outcome::NeverStarted
        ]
    );
    assert_eq!(report.count(Outcome::Committed), 0);

    let error = report.error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::StageFailed);
    assert_eq!(error.entry, Some(2));

    // the two staged files are the leftovers, and status sees the same ones
    assert_eq!(report.residuals.len(), 2);
    let status = status_operation(&plan.target_dir).unwrap();
    let mut expected = report.residuals.clone();
    expected.sort();
    let mut found = status.residuals;
    found.sort();
    assert_eq!(found, expected);
    assert_eq!(status.file_count, 3);

    for entry in &report.entries[..2] {
        let temp_name = entry.temp_name.as_deref().unwrap();
        assert_eq!(entry.current_name, temp_name);
        assert_eq!(
            read(&plan.target_dir, temp_name),
            format!("content of {}", entry.old_name)
        );
    }
    assert_eq!(read(target.path(), "3.txt"), "content of 3.txt");
}

#[test]
fn test_commit_failure_keeps_earlier_commits() {
    let target = dir_with(&["1.txt", "2.txt", "3.txt"]);
    let template = dir_with(&["a.txt", "b.txt", "c.txt"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    // three stage renames, then the second commit fails
    let report = execute_with(
        &plan,
        &ExecuteOptions::confirmed(),
        &mut DenyNthRename { n: 5, calls: 0 },
    );

    assert_eq!(report.state, OperationState::Failed(Phase::Committing));
    assert_eq!(report.error.as_ref().unwrap().kind, ErrorKind::CommitFailed);
    assert_eq!(report.entries[0].outcome, Outcome::Committed);
    assert_eq!(report.entries[1].outcome, Outcome::Failed);
    assert_eq!(report.entries[2].outcome, Outcome::Staged);
    assert_eq!(read(target.path(), "a.txt"), "content of 1.txt");
    assert_eq!(report.residuals.len(), 2);
}

#[test]
fn test_unconfirmed_touches_nothing() {
    let target = dir_with(&["1.txt"]);
    let template = dir_with(&["a.txt"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    let report = execute(&plan, &ExecuteOptions::default());

    assert_eq!(report.error.as_ref().unwrap().kind, ErrorKind::NotConfirmed);
    assert_eq!(report.count(Outcome::NeverStarted), 1);
    assert_eq!(list_files(target.path()).unwrap(), vec!["1.txt"]);
}

#[test]
fn test_file_added_after_scan_is_refused() {
    let target = dir_with(&["1.txt", "2.txt"]);
    let template = dir_with(&["a.txt", "b.txt"]);

    let (plan, _) = pair(target.path(), template.path()).unwrap();
    fs::write(target.path().join("3.txt"), "").unwrap();

    let report = execute(&plan, &ExecuteOptions::confirmed());

    assert_eq!(report.error.as_ref().unwrap().kind, ErrorKind::CountMismatch);
    assert_eq!(report.state, OperationState::Scanned);
    assert_eq!(list_files(target.path()).unwrap(), vec!["1.txt", "2.txt", "3.txt"]);
}
