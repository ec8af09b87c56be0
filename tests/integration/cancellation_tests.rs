use dupescan::duplicates::{DuplicateFinder, FinderConfig, FinderError, PipelineState};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

fn populate(dir: &std::path::Path, buckets: usize) {
    // One duplicate pair per distinct size
    for size in 1..=buckets {
        let content = vec![b'z'; size];
        fs::write(dir.join(format!("a{size:03}")), &content).unwrap();
        fs::write(dir.join(format!("b{size:03}")), &content).unwrap();
    }
}

#[test]
fn test_cancel_before_scan() {
    let dir = tempdir().unwrap();
    populate(dir.path(), 3);

    let flag = Arc::new(AtomicBool::new(true));
    let finder = DuplicateFinder::new(FinderConfig::default().with_shutdown_flag(flag));

    let result = finder.find_duplicates(dir.path());
    assert!(matches!(result, Err(FinderError::Interrupted)));
}

#[test]
fn test_cancel_after_first_group_stops_emission() {
    let dir = tempdir().unwrap();
    populate(dir.path(), 50);

    let flag = Arc::new(AtomicBool::new(false));
    let config = FinderConfig::default()
        .with_workers(4)
        .with_queue_capacity(2)
        .with_shutdown_flag(flag.clone());
    let finder = DuplicateFinder::new(config);

    let discovery = finder.discover(&[dir.path().to_path_buf()]);
    assert_eq!(discovery.index.len(), 100);

    let mut emitted = Vec::new();
    let report = finder
        .compare(&discovery.index, |group| {
            emitted.push(group);
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

    assert_eq!(emitted.len(), 1);
    assert!(report.interrupted);
    assert_eq!(report.groups_emitted, 1);
    assert_eq!(report.state(), PipelineState::Done);
    assert!(report.states.contains(&PipelineState::Cancelled));
    // Emitted groups are whole
    assert_eq!(emitted[0].len(), 2);
}

#[test]
fn test_uncancelled_run_drains_every_bucket() {
    let dir = tempdir().unwrap();
    populate(dir.path(), 25);

    let flag = Arc::new(AtomicBool::new(false));
    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_workers(3)
            .with_queue_capacity(1)
            .with_shutdown_flag(flag),
    );

    let discovery = finder.discover(&[dir.path().to_path_buf()]);
    let mut count = 0;
    let report = finder.compare(&discovery.index, |_| count += 1).unwrap();

    assert_eq!(count, 25);
    assert!(!report.interrupted);
    assert_eq!(report.buckets_total, 25);
    assert_eq!(report.buckets_compared, 25);
    assert_eq!(
        report.states,
        vec![
            PipelineState::Idle,
            PipelineState::Running,
            PipelineState::Draining,
            PipelineState::Done
        ]
    );
}
