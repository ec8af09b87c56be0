use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use dupescan::scanner::ScanError;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_two_non_overlapping_directories() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    write(&dir1.path().join("a.txt"), b"dup");
    write(&dir2.path().join("b.txt"), b"dup");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_overlapping_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    write(&dir.path().join("a.txt"), b"content");
    write(&sub.join("b.txt"), b"different");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[sub.clone(), dir.path().to_path_buf()])
        .unwrap();

    // sub is inside dir, so b.txt must be seen once
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_same_directory_twice() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"once");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir.path().to_path_buf(), dir.path().join(".")])
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_missing_root_is_reported_and_others_scanned() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x/a.txt"), b"same bytes");
    write(&dir.path().join("x/b.txt"), b"same bytes");
    let missing = dir.path().join("nope");

    let finder = DuplicateFinder::new(FinderConfig::default().with_workers(2));
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir.path().join("x"), missing.clone()])
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.errors.len(), 1);
    match &summary.errors[0] {
        ScanError::NotFound(path) => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_file_and_directory_roots_mixed() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("single.bin"), b"0123456789");
    write(&dir.path().join("tree/copy.bin"), b"0123456789");
    write(&dir.path().join("tree/unrelated.bin"), b"abcdefghij");

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder
        .find_duplicates_in_paths(&[dir.path().join("single.bin"), dir.path().join("tree")])
        .unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(groups.len(), 1);
    let mut names: Vec<_> = groups[0].files.iter().map(|f| f.file.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["copy.bin", "single.bin"]);
}

#[test]
fn test_discovery_reports_canonical_roots() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a/f.txt"), b"1");
    write(&dir.path().join("b/g.txt"), b"2");

    let finder = DuplicateFinder::with_defaults();
    let relative_style = dir.path().join("a").join("..").join("b");
    let discovery = finder.discover(&[dir.path().join("a"), relative_style]);

    assert_eq!(discovery.roots.len(), 2);
    assert!(discovery.roots.iter().all(|r| r.is_absolute()));
    assert!(discovery.roots[1].ends_with("b"));
    assert!(!discovery.roots[1].to_string_lossy().contains(".."));
    assert_eq!(discovery.index.len(), 2);
}

#[test]
fn test_many_roots_are_all_walked() {
    let roots: Vec<_> = (0..12).map(|_| tempdir().unwrap()).collect();
    for (i, root) in roots.iter().enumerate() {
        for j in 0..4 {
            write(&root.path().join(format!("f{j}.txt")), format!("{i}-{j}").as_bytes());
        }
        write(&root.path().join("shared.txt"), b"shared");
    }
    let paths: Vec<_> = roots.iter().map(|r| r.path().to_path_buf()).collect();

    let finder = DuplicateFinder::new(FinderConfig::default().with_workers(1));
    let (groups, summary) = finder.find_duplicates_in_paths(&paths).unwrap();

    assert_eq!(summary.total_files, 60);
    assert!(summary.errors.is_empty(), "{:?}", summary.errors);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 12);
}
