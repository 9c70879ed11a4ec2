use clap::Parser;
use dupscan::cli::Cli;
use dupscan::error::ExitCode;
use dupscan::findings::read_findings;
use dupscan::run_app;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli_for(root: &Path, log: &Path, config: &Path, extra: &[&str]) -> Cli {
    let mut args = vec![
        "dupscan".to_string(),
        "--no-progress".to_string(),
        "--workers".to_string(),
        "4".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        "--log-file".to_string(),
        log.display().to_string(),
    ];
    args.extend(extra.iter().map(|s| (*s).to_string()));
    args.push(root.display().to_string());
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_app_scan_only_leaves_files_in_place() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("b.txt"), "hello").unwrap();
    fs::write(root.join("c.txt"), "world").unwrap();
    let log = dir.path().join("duplicates.txt");

    let code = run_app(cli_for(&root, &log, &dir.path().join("none.toml"), &[])).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(read_findings(&log).unwrap().len(), 1);
    assert!(root.join("a.txt").exists());
    assert!(root.join("b.txt").exists());
    assert!(root.join("c.txt").exists());
}

#[test]
fn test_app_delete_removes_recorded_duplicates() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("b.txt"), "hello").unwrap();
    fs::write(root.join("c.txt"), "world").unwrap();
    let log = dir.path().join("duplicates.txt");

    let code = run_app(cli_for(
        &root,
        &log,
        &dir.path().join("none.toml"),
        &["--delete-duplicated"],
    ))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    let findings = read_findings(&log).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(!findings[0].duplicate.exists());
    assert!(findings[0].original.exists());
    assert!(root.join("c.txt").exists());
}

#[test]
fn test_app_log_inside_scanned_tree_is_not_scanned() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), "1").unwrap();
    fs::write(dir.path().join("two"), "2").unwrap();
    let log = dir.path().join("duplicates.txt");
    // A previous run's log must not be mistaken for scan input.
    fs::write(&log, "").unwrap();

    let code = run_app(cli_for(dir.path(), &log, &dir.path().join("none.toml"), &[])).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(read_findings(&log).unwrap().is_empty());
}

#[test]
fn test_app_missing_root_succeeds_with_nothing_found() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("duplicates.txt");

    let code = run_app(cli_for(
        &dir.path().join("missing"),
        &log,
        &dir.path().join("none.toml"),
        &[],
    ))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(fs::read_to_string(&log).unwrap(), "");
}

#[test]
fn test_app_unopenable_log_is_an_error() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    let log = dir.path().join("no-such-dir").join("duplicates.txt");

    let result = run_app(cli_for(&root, &log, &dir.path().join("none.toml"), &[]));

    assert!(result.is_err());
}

#[test]
fn test_app_reads_config_file() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a"), "same").unwrap();
    fs::write(root.join("b"), "same").unwrap();
    let configured_log = dir.path().join("from-config.txt");
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("workers = 2\nlog_file = {:?}\n", configured_log.display().to_string()),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "dupscan".to_string(),
        "--no-progress".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        root.display().to_string(),
    ])
    .unwrap();
    let code = run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(read_findings(&configured_log).unwrap().len(), 1);
}
