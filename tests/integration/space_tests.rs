use dupscan::actions::reclaimable_space;
use dupscan::findings::{DuplicateFinding, ResultLog};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_space_totals_are_order_independent() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("orig");
    let small = dir.path().join("small");
    let large = dir.path().join("large");
    fs::write(&original, vec![0u8; 10]).unwrap();
    fs::write(&small, vec![1u8; 100]).unwrap();
    fs::write(&large, vec![2u8; 2000]).unwrap();

    let forward = dir.path().join("forward.txt");
    let backward = dir.path().join("backward.txt");
    let log = ResultLog::open(&forward).unwrap();
    log.record(&DuplicateFinding::new(&small, &original)).unwrap();
    log.record(&DuplicateFinding::new(&large, &original)).unwrap();
    let log = ResultLog::open(&backward).unwrap();
    log.record(&DuplicateFinding::new(&large, &original)).unwrap();
    log.record(&DuplicateFinding::new(&small, &original)).unwrap();

    let a = reclaimable_space(&forward).unwrap();
    let b = reclaimable_space(&backward).unwrap();

    assert_eq!(a.total_bytes, 2100);
    assert_eq!(a, b);
}

#[test]
fn test_space_skips_vanished_files() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("orig");
    let present = dir.path().join("present");
    let gone = dir.path().join("gone");
    fs::write(&original, "abc").unwrap();
    fs::write(&present, "abc").unwrap();

    let log_path = dir.path().join("duplicates.txt");
    let log = ResultLog::open(&log_path).unwrap();
    log.record(&DuplicateFinding::new(&present, &original)).unwrap();
    log.record(&DuplicateFinding::new(&gone, &original)).unwrap();

    let report = reclaimable_space(&log_path).unwrap();

    assert_eq!(report.total_bytes, 3);
    assert_eq!(report.counted, 1);
    assert_eq!(report.missing, vec![gone]);
}

#[test]
fn test_space_of_megabyte_file() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("orig");
    let dup = dir.path().join("dup");
    fs::write(&original, vec![7u8; 1024 * 1024]).unwrap();
    fs::write(&dup, vec![7u8; 1024 * 1024]).unwrap();

    let log_path = dir.path().join("duplicates.txt");
    ResultLog::open(&log_path)
        .unwrap()
        .record(&DuplicateFinding::new(&dup, &original))
        .unwrap();

    let report = reclaimable_space(&log_path).unwrap();

    assert!((report.megabytes() - 1.0).abs() < f64::EPSILON);
    assert_eq!(format!("{:.2}", report.megabytes()), "1.00");
}

#[test]
fn test_space_missing_log_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(reclaimable_space(&dir.path().join("absent.txt")).is_err());
}
