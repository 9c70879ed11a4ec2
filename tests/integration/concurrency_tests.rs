use dupscan::duplicates::{DuplicateFinder, FinderConfig};
use dupscan::findings::{read_findings, ResultLog};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Lay out `pairs` identical pairs plus `uniques` unique files below `root`,
/// spread over a few subdirectories.
fn populate(root: &std::path::Path, pairs: usize, uniques: usize) {
    for i in 0..pairs {
        let sub = root.join(format!("pair_dir_{}", i % 4));
        fs::create_dir_all(&sub).unwrap();
        let content = format!("pair content {i}");
        fs::write(sub.join(format!("left_{i}.bin")), &content).unwrap();
        fs::write(root.join(format!("right_{i}.bin")), &content).unwrap();
    }
    for i in 0..uniques {
        fs::write(root.join(format!("unique_{i}.bin")), format!("unique {i}")).unwrap();
    }
}

#[test]
fn test_many_workers_find_each_pair_exactly_once() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    populate(&root, 40, 60);
    let log_path = dir.path().join("duplicates.txt");
    let results = ResultLog::open(&log_path).unwrap();

    let summary = DuplicateFinder::new(FinderConfig::default().with_workers(16))
        .find_duplicates(&root, &results)
        .unwrap();
    drop(results);

    assert_eq!(summary.total_files, 140);
    assert_eq!(summary.duplicate_count(), 40);
    assert_eq!(summary.log_failures, 0);

    let findings = read_findings(&log_path).unwrap();
    assert_eq!(findings.len(), 40);

    // No path is ever logged as a duplicate twice, and no file is both a
    // duplicate and an original.
    let duplicates: HashSet<&PathBuf> = findings.iter().map(|f| &f.duplicate).collect();
    let originals: HashSet<&PathBuf> = findings.iter().map(|f| &f.original).collect();
    assert_eq!(duplicates.len(), 40);
    assert!(duplicates.is_disjoint(&originals));
    for finding in &findings {
        assert_eq!(
            fs::read(&finding.duplicate).unwrap(),
            fs::read(&finding.original).unwrap()
        );
    }
}

#[test]
fn test_many_copies_share_one_original() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    for i in 0..25 {
        fs::write(root.join(format!("copy_{i}.dat")), b"identical payload").unwrap();
    }
    let log_path = dir.path().join("duplicates.txt");
    let results = ResultLog::open(&log_path).unwrap();

    let summary = DuplicateFinder::new(FinderConfig::default().with_workers(8))
        .find_duplicates(&root, &results)
        .unwrap();
    drop(results);

    assert_eq!(summary.duplicate_count(), 24);

    let findings = read_findings(&log_path).unwrap();
    let mut by_original: HashMap<&PathBuf, usize> = HashMap::new();
    for finding in &findings {
        *by_original.entry(&finding.original).or_default() += 1;
    }
    assert_eq!(by_original.len(), 1);
    assert_eq!(by_original.values().sum::<usize>(), 24);
}

#[test]
fn test_single_worker_matches_parallel_counts() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    populate(&root, 10, 10);

    let mut counts = Vec::new();
    for workers in [1, 4, 60] {
        let results = ResultLog::open(&dir.path().join(format!("log_{workers}.txt"))).unwrap();
        let summary = DuplicateFinder::new(FinderConfig::default().with_workers(workers))
            .find_duplicates(&root, &results)
            .unwrap();
        counts.push((summary.total_files, summary.duplicate_count()));
    }

    assert!(counts.iter().all(|&c| c == (30, 10)));
}
