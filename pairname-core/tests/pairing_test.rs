use pairname_core::{list_files, pair, CountMismatch, ErrorKind, PairError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn dir_with(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        fs::write(temp_dir.path().join(name), name).unwrap();
    }
    temp_dir
}

fn pairs(target: &Path, template: &Path) -> Vec<(String, String)> {
    let (plan, _) = pair(target, template).unwrap();
    plan.entries
        .iter()
        .map(|entry| (entry.old_name(), entry.destination_name.clone()))
        .collect()
}

#[test]
fn test_pairs_in_natural_order() {
    let target = dir_with(&["b.txt", "a.txt", "c.txt"]);
    let template = dir_with(&["x.png", "y.png", "z.png"]);

    assert_eq!(
        pairs(target.path(), template.path()),
        vec![
            ("a.txt".to_string(), "x.png".to_string()),
            ("b.txt".to_string(), "y.png".to_string()),
            ("c.txt".to_string(), "z.png".to_string()),
        ]
    );
}

#[test]
fn test_numbered_files_pair_by_value() {
    let target = dir_with(&["scan 10.tif", "scan 9.tif", "scan 100.tif", "scan 1.tif"]);
    let template = dir_with(&["page_02.tif", "page_1.tif", "page_3.tif", "page_0004.tif"]);

    let result = pairs(target.path(), template.path());
    let old: Vec<&str> = result.iter().map(|(old, _)| old.as_str()).collect();
    let new: Vec<&str> = result.iter().map(|(_, new)| new.as_str()).collect();

    assert_eq!(old, ["scan 1.tif", "scan 9.tif", "scan 10.tif", "scan 100.tif"]);
    assert_eq!(new, ["page_1.tif", "page_02.tif", "page_3.tif", "page_0004.tif"]);
}

#[test]
fn test_mismatch_keeps_shorter_listing() {
    let target = dir_with(&["1.txt", "2.txt", "3.txt"]);
    let template = dir_with(&["a.txt", "b.txt"]);

    let (plan, mismatch) = pair(target.path(), template.path()).unwrap();

    assert_eq!(
        mismatch,
        Some(CountMismatch {
            target_count: 3,
            template_count: 2
        })
    );
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.count_message(), "mismatch: target=3, template=2");
}

#[test]
fn test_subdirectories_and_hidden_files_are_ignored() {
    let target = dir_with(&["a.txt", ".DS_Store"]);
    fs::create_dir(target.path().join("nested")).unwrap();
    fs::write(target.path().join("nested").join("deep.txt"), "").unwrap();
    let template = dir_with(&["b.txt"]);

    assert_eq!(list_files(target.path()).unwrap(), vec!["a.txt"]);
    let (plan, mismatch) = pair(target.path(), template.path()).unwrap();
    assert!(mismatch.is_none());
    assert_eq!(plan.entries[0].destination_name, "b.txt");
}

#[test]
fn test_empty_directory_is_an_error() {
    let target = dir_with(&["a.txt"]);
    let template = TempDir::new().unwrap();

    let err = pair(target.path(), template.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyListing);
    assert!(matches!(err, PairError::EmptyListing { ref path } if path == template.path()));
}

#[test]
fn test_unreadable_directory_is_an_error() {
    let target = dir_with(&["a.txt"]);
    let missing = target.path().join("missing");

    let err = pair(target.path(), &missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DirectoryUnreadable);
}

#[test]
fn test_same_directory_pairs_with_itself() {
    let dir = dir_with(&["2.txt", "1.txt"]);

    let (plan, mismatch) = pair(dir.path(), dir.path()).unwrap();
    assert!(mismatch.is_none());
    assert_eq!(plan.changes(), 0);
    assert!(plan.entries.iter().all(|entry| entry.is_unchanged()));
}
