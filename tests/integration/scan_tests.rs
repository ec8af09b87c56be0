use dupescan::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupescan::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

fn names(group: &dupescan::duplicates::DuplicateGroup) -> Vec<String> {
    let mut names: Vec<String> = group.files.iter().map(|f| f.file.name.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let result = finder.find_duplicates(dir.path());
    assert!(matches!(result, Err(FinderError::NoFiles(_))));
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content b");
    write(&dir.path().join("c.txt"), b"content c");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    // Same size, different content
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_hello_world() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hello");
    write(&dir.path().join("b.txt"), b"hello");
    write(&dir.path().join("c.txt"), b"world");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(names(&groups[0]), vec!["a.txt", "b.txt"]);
    assert!(groups[0]
        .files
        .iter()
        .all(|f| f.file.path.file_name().unwrap() != "c.txt"));
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 5);
}

#[test]
fn test_scan_single_file() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("only.bin"), b"lonely");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
    assert!(summary.errors.is_empty());
}

#[test]
fn test_scan_nested_duplicates() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a/b/c/deep.txt"), b"nested copy");
    write(&dir.path().join("top.txt"), b"nested copy");
    write(&dir.path().join("a/other.txt"), b"other bytes");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(names(&groups[0]), vec!["deep.txt", "top.txt"]);
    for member in &groups[0].files {
        assert!(member.file.path.is_absolute());
    }
}

#[test]
fn test_group_members_share_size_and_digest() {
    let dir = tempdir().unwrap();
    for i in 0..12 {
        let content = format!("payload {}", i % 3);
        write(&dir.path().join(format!("f{i}.dat")), content.as_bytes());
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert_eq!(group.len(), 4);
        assert!(group.files.iter().all(|f| f.hash == group.hash));
        assert!(group.files.iter().all(|f| f.file.size == group.size));
    }
    assert_eq!(summary.duplicate_files, 9);
}

#[test]
fn test_every_file_appears_in_at_most_one_group() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        let content = vec![b'a' + (i % 5) as u8; 10 + (i % 2)];
        write(&dir.path().join(format!("f{i:02}")), &content);
    }

    let (groups, _) = DuplicateFinder::new(FinderConfig::default().with_workers(4))
        .find_duplicates(dir.path())
        .unwrap();

    let mut seen = std::collections::HashSet::new();
    for group in &groups {
        assert!(group.len() >= 2);
        for member in &group.files {
            assert!(seen.insert(member.file.path.clone()), "listed twice");
        }
    }
}

#[test]
fn test_scan_with_size_filters() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("small1"), b"ab");
    write(&dir.path().join("small2"), b"ab");
    write(&dir.path().join("big1"), &[7u8; 4096]);
    write(&dir.path().join("big2"), &[7u8; 4096]);

    let walker_config = WalkerConfig {
        min_size: Some(100),
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 4096);
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_scan_with_ignore_patterns() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("keep1.txt"), b"same");
    write(&dir.path().join("keep2.txt"), b"same");
    write(&dir.path().join("skip.tmp"), b"same");
    write(&dir.path().join("cache/x.txt"), b"same");

    let walker_config = WalkerConfig {
        ignore_patterns: vec!["*.tmp".to_string(), "cache/".to_string()],
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(names(&groups[0]), vec!["keep1.txt", "keep2.txt"]);
}

#[test]
fn test_repeated_scans_give_identical_groups() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        write(
            &dir.path().join(format!("f{i}")),
            format!("v{}", i % 4).as_bytes(),
        );
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_workers(3));
    let collect = || {
        let (groups, _) = finder.find_duplicates(dir.path()).unwrap();
        let mut sets: Vec<Vec<String>> = groups.iter().map(names).collect();
        sets.sort();
        sets
    };

    assert_eq!(collect(), collect());
}

#[test]
fn test_gitignored_files_are_still_compared() {
    let dir = tempdir().unwrap();
    write(&dir.path().join(".gitignore"), b"*.log\n");
    write(&dir.path().join("a.log"), b"hello");
    write(&dir.path().join("b.log"), b"hello");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(names(&groups[0]), vec!["a.log", "b.log"]);
    assert_eq!(summary.total_files, 3);
}

#[test]
fn test_root_gitignore_applies_when_enabled() {
    let dir = tempdir().unwrap();
    write(&dir.path().join(".gitignore"), b"*.log\n");
    write(&dir.path().join("a.log"), b"hello");
    write(&dir.path().join("b.log"), b"hello");

    let walker_config = WalkerConfig::default().with_gitignore(true);
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}
