//! Tests for configuration loading and root folder resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate CINEDB_ROOT_FOLDER are marked with #[serial].

use cinedb_common::config::{
    default_root_folder, EmptyResultPolicy, RootFolderInitializer, RootFolderResolver,
    TomlConfig, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = RootFolderResolver::new(None).resolve();

    assert!(!root_folder.as_os_str().is_empty());
    assert_eq!(root_folder, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/cinedb-test-env-folder");

    let root_folder = RootFolderResolver::new(None).resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/cinedb-test-env-folder"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_beats_env_and_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/from-toml")),
        ..TomlConfig::default()
    };

    let root_folder = RootFolderResolver::new(Some(PathBuf::from("/tmp/from-cli")))
        .with_toml(&toml)
        .resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/from-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/from-toml")),
        ..TomlConfig::default()
    };

    let root_folder = RootFolderResolver::new(None).with_toml(&toml).resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/from-env"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_toml_used_without_cli_or_env() {
    env::remove_var(ROOT_FOLDER_ENV);
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/from-toml")),
        ..TomlConfig::default()
    };

    let root_folder = RootFolderResolver::new(None).with_toml(&toml).resolve();
    assert_eq!(root_folder, PathBuf::from("/tmp/from-toml"));
}

#[test]
fn test_toml_config_all_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/cinedb"
source_csv = "exports/movies.csv"
database_file = "catalog.db"
bind_address = "0.0.0.0:8080"
empty_result = "empty"
log_level = "debug"
"#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/cinedb")));
    assert_eq!(config.source_csv, Some(PathBuf::from("exports/movies.csv")));
    assert_eq!(config.database_file, Some(PathBuf::from("catalog.db")));
    assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:8080"));
    assert_eq!(config.empty_result, Some(EmptyResultPolicy::Empty));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_toml_config_empty_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    assert_eq!(TomlConfig::load(&path).unwrap(), TomlConfig::default());
}

#[test]
fn test_toml_config_invalid_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "empty_result = \"sometimes\"").unwrap();

    let err = TomlConfig::load(&path).unwrap_err();
    assert!(matches!(err, cinedb_common::Error::Config(_)), "got {:?}", err);
}

#[test]
fn test_initializer_creates_missing_root_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("nested").join("cinedb");

    let initializer = RootFolderInitializer::new(root.clone());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert_eq!(
        initializer.database_path(&TomlConfig::default()),
        root.join("movies.db")
    );
}
