use dupscan::config::Config;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.workers, 60);
    assert_eq!(config.max_attempts, 300);
    assert_eq!(config.log_file, PathBuf::from("duplicates.txt"));
}

#[test]
fn test_config_load_from_env() {
    // Only settings that cannot change the outcome of other tests
    std::env::set_var("DUPSCAN_BLOCK_SIZE", "8192");
    std::env::set_var("DUPSCAN_MAX_BACKOFF_MS", "250");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("DUPSCAN_").only(&["block_size", "max_backoff_ms"]));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.block_size, 8192);
    assert_eq!(config.max_backoff_ms, 250);
    assert_eq!(config.workers, 60);

    std::env::remove_var("DUPSCAN_BLOCK_SIZE");
    std::env::remove_var("DUPSCAN_MAX_BACKOFF_MS");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
workers = 8
retry_base_ms = 5
log_file = "/var/tmp/dupes.txt"
follow_symlinks = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.workers, 8);
    assert_eq!(config.retry_base_ms, 5);
    assert_eq!(config.log_file, PathBuf::from("/var/tmp/dupes.txt"));
    assert!(config.follow_symlinks);
    // Unset keys keep their defaults
    assert_eq!(config.block_size, 512_000);

    let hasher = config.hasher_config();
    assert_eq!(hasher.base_backoff, Duration::from_millis(5));
}

#[test]
fn test_config_invalid_toml_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "workers = \"many\"").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let config = Config::load(Some(&temp_dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config.workers, 60);
    assert_eq!(config.log_file, PathBuf::from("duplicates.txt"));
}

#[test]
fn test_config_save_round_trip() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");
    let config = Config {
        workers: 12,
        log_file: PathBuf::from("found.txt"),
        ..Default::default()
    };

    config.save(&config_path).unwrap();
    let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert_eq!(loaded, config);
}
