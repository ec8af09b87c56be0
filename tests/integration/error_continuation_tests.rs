use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use dupescan::scanner::{FileEntry, HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_duplicates_from_files_continues_on_error() {
    let finder = DuplicateFinder::with_defaults();
    // Files that don't exist fail to hash
    let file1 = FileEntry::new(PathBuf::from("nonexistent_1.txt"), 100);
    let file2 = FileEntry::new(PathBuf::from("nonexistent_2.txt"), 100);

    let (groups, summary) = finder
        .find_duplicates_from_files(vec![file1, file2])
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.errors.len(), 2);

    for err in &summary.errors {
        match err {
            ScanError::Hash(HashError::NotFound(_)) => {}
            _ => panic!("Expected NotFound HashError, got: {:?}", err),
        }
    }
}

#[test]
fn test_vanished_file_does_not_hide_remaining_duplicates() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, b"twelve bytes").unwrap();
    fs::write(&b, b"twelve bytes").unwrap();

    let files = vec![
        FileEntry::new(a.clone(), 12),
        FileEntry::new(dir.path().join("gone.bin"), 12),
        FileEntry::new(b.clone(), 12),
    ];

    let finder = DuplicateFinder::new(FinderConfig::default().with_workers(2));
    let (groups, summary) = finder.find_duplicates_from_files(files).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths(), vec![a, b]);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.has_errors());
    assert_eq!(summary.hashed_files, 2);
}

#[test]
fn test_errors_in_one_bucket_leave_other_buckets_intact() {
    let dir = tempdir().unwrap();
    let mut files = Vec::new();
    for i in 0..3 {
        let path = dir.path().join(format!("small{i}"));
        fs::write(&path, b"xy").unwrap();
        files.push(FileEntry::new(path, 2));
    }
    files.push(FileEntry::new(dir.path().join("missing1"), 64));
    files.push(FileEntry::new(dir.path().join("missing2"), 64));

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_from_files(files)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 2);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(summary.errors.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(dir.path().join("open1.txt"), b"same!").unwrap();
    fs::write(dir.path().join("open2.txt"), b"same!").unwrap();
    fs::write(&locked, b"same!").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything; nothing to test then
    if fs::File::open(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(matches!(
        &summary.errors[0],
        ScanError::Hash(HashError::PermissionDenied(p)) if p.ends_with("locked.txt")
    ));
}
