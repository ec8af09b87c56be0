use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use dupescan::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn create(path: &std::path::Path, content: &[u8]) {
    File::create(path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", path.display()))
        .write_all(content)
        .unwrap();
}

#[test]
fn test_paths_with_quotes() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        create(&dir.path().join("file_with_\"quote\".txt"), b"content");
        create(&dir.path().join("duplicate.txt"), b"content");

        let finder = DuplicateFinder::with_defaults();
        let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups[0]
            .files
            .iter()
            .any(|f| f.file.path.to_string_lossy().contains('"')));
    }
}

#[test]
fn test_paths_with_newlines() {
    let dir = tempdir().unwrap();

    if cfg!(not(windows)) {
        create(&dir.path().join("file_with\nnewline.txt"), b"content");
        create(&dir.path().join("duplicate.txt"), b"content");

        let finder = DuplicateFinder::with_defaults();
        let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups[0].files.iter().any(|f| f.file.name.contains('\n')));
    }
}

#[test]
fn test_unicode_filenames() {
    let dir = tempdir().unwrap();
    create(&dir.path().join("résumé.txt"), b"unicode body");
    create(&dir.path().join("履歴書.txt"), b"unicode body");
    create(&dir.path().join("emoji_🦀.txt"), b"unicode body");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert!(groups[0].files.iter().any(|f| f.file.name == "履歴書.txt"));
}

#[test]
fn test_extremely_long_filename() {
    let dir = tempdir().unwrap();
    let long_name = format!("{}.txt", "n".repeat(200));
    create(&dir.path().join(&long_name), b"long");
    create(&dir.path().join("short.txt"), b"long");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].files.iter().any(|f| f.file.name == long_name));
}

#[test]
fn test_hidden_files_can_be_skipped() {
    let dir = tempdir().unwrap();
    create(&dir.path().join(".hidden"), b"secret");
    create(&dir.path().join("visible"), b"secret");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);

    let walker_config = WalkerConfig {
        skip_hidden: true,
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed_by_default() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.txt");
    create(&target, b"linked");
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_followed_when_enabled() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    let outside = tempdir().unwrap();
    fs::create_dir(&real).unwrap();
    create(&real.join("a.txt"), b"inside");
    create(&outside.path().join("b.txt"), b"inside");
    std::os::unix::fs::symlink(outside.path(), real.join("jump")).unwrap();

    let walker_config = WalkerConfig {
        follow_symlinks: true,
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let (groups, _) = finder.find_duplicates(&real).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}
