//! Configuration loading and root folder resolution
//!
//! Every CineDB binary works inside one root folder holding the source export
//! and the SQLite store. The root folder is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `CINEDB_ROOT_FOLDER` environment variable
//! 3. `root_folder` key of the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing TOML file is not an error. An unreadable one is reported to the
//! caller, which logs it and carries on with the remaining tiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "CINEDB_ROOT_FOLDER";

/// Store file name used when the config does not name one
pub const DEFAULT_DATABASE_FILE: &str = "movies.db";

/// Source export file name used when the config does not name one
pub const DEFAULT_SOURCE_FILE: &str = "movies.csv";

/// Listen address of the catalog browser
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";

/// What the catalog shows when a filter matches nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultPolicy {
    /// Fall back to the entire unfiltered catalog
    #[default]
    ShowAll,
    /// Return the empty result as-is
    Empty,
}

impl FromStr for EmptyResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show_all" | "show-all" => Ok(Self::ShowAll),
            "empty" => Ok(Self::Empty),
            other => Err(format!(
                "unknown empty result policy '{}' (expected 'show_all' or 'empty')",
                other
            )),
        }
    }
}

impl fmt::Display for EmptyResultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowAll => f.write_str("show_all"),
            Self::Empty => f.write_str("empty"),
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    /// Source export, relative paths are taken from the root folder
    pub source_csv: Option<PathBuf>,
    /// SQLite store, relative paths are taken from the root folder
    pub database_file: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub empty_result: Option<EmptyResultPolicy>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the platform config file; defaults when there is none
    ///
    /// Callers decide what an unreadable file means. The binaries log it and
    /// continue with [`TomlConfig::default`].
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Effective empty-result policy, CLI override first
    pub fn empty_result_policy(&self, cli: Option<EmptyResultPolicy>) -> EmptyResultPolicy {
        cli.or(self.empty_result).unwrap_or_default()
    }

    /// Effective bind address, CLI override first
    pub fn bind_address(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
    }
}

/// Resolves the root folder through the four configuration tiers
pub struct RootFolderResolver<'a> {
    cli_arg: Option<PathBuf>,
    toml: Option<&'a TomlConfig>,
}

impl<'a> RootFolderResolver<'a> {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self { cli_arg, toml: None }
    }

    pub fn with_toml(mut self, toml: &'a TomlConfig) -> Self {
        self.toml = Some(toml);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = self.toml.and_then(|t| t.root_folder.clone()) {
            return path;
        }

        // Priority 4: OS-dependent compiled default
        default_root_folder()
    }
}

/// Derives file locations inside a resolved root folder
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder if it is missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            debug!("Created root folder {}", self.root_folder.display());
        }
        Ok(())
    }

    /// Store path: config value (absolute, or relative to the root) or `movies.db`
    pub fn database_path(&self, toml: &TomlConfig) -> PathBuf {
        self.within_root(toml.database_file.as_deref(), DEFAULT_DATABASE_FILE)
    }

    /// Source export path: config value (absolute, or relative to the root) or `movies.csv`
    pub fn source_path(&self, toml: &TomlConfig) -> PathBuf {
        self.within_root(toml.source_csv.as_deref(), DEFAULT_SOURCE_FILE)
    }

    fn within_root(&self, configured: Option<&Path>, default_name: &str) -> PathBuf {
        // join() keeps absolute paths untouched
        match configured {
            Some(path) => self.root_folder.join(path),
            None => self.root_folder.join(default_name),
        }
    }
}

/// Platform config file location, if one exists
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("cinedb").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/cinedb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/cinedb (or /var/lib/cinedb for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("cinedb"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/cinedb"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("cinedb"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/cinedb"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("cinedb"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\cinedb"))
    } else {
        PathBuf::from("./cinedb_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_policy_parse() {
        assert_eq!("show_all".parse::<EmptyResultPolicy>().unwrap(), EmptyResultPolicy::ShowAll);
        assert_eq!("Show-All".parse::<EmptyResultPolicy>().unwrap(), EmptyResultPolicy::ShowAll);
        assert_eq!(" empty ".parse::<EmptyResultPolicy>().unwrap(), EmptyResultPolicy::Empty);
        assert!("nothing".parse::<EmptyResultPolicy>().is_err());
    }

    #[test]
    fn test_empty_result_policy_default_is_fallback() {
        assert_eq!(EmptyResultPolicy::default(), EmptyResultPolicy::ShowAll);
        assert_eq!(EmptyResultPolicy::ShowAll.to_string(), "show_all");
    }

    #[test]
    fn test_paths_relative_to_root() {
        let init = RootFolderInitializer::new(PathBuf::from("/data/cinedb"));
        let toml = TomlConfig::default();
        assert_eq!(init.database_path(&toml), PathBuf::from("/data/cinedb/movies.db"));
        assert_eq!(init.source_path(&toml), PathBuf::from("/data/cinedb/movies.csv"));

        let toml = TomlConfig {
            database_file: Some(PathBuf::from("catalog.db")),
            source_csv: Some(PathBuf::from("/exports/title.basics.csv")),
            ..TomlConfig::default()
        };
        assert_eq!(init.database_path(&toml), PathBuf::from("/data/cinedb/catalog.db"));
        assert_eq!(init.source_path(&toml), PathBuf::from("/exports/title.basics.csv"));
    }
}
