//! Configuration management for `tourwithme.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                  |
//! |-------------|------------------------------------------|
//! | `[storage]` | Where persisted site content lives       |
//! | `[serve]`   | Local HTTP server (interface, port)      |
//!
//! # Example
//!
//! ```toml
//! [storage]
//! dir = "~/.local/share/tourwithme"
//!
//! [serve]
//! interface = "0.0.0.0"
//! port = 8080
//! ```
//!
//! A missing config file is not an error: every field has a default.

pub mod defaults;
mod error;
mod serve;
mod storage;

pub use error::ConfigError;
pub use serve::ServeConfig;
pub use storage::StorageConfig;

use crate::{
    cli::{Cli, Commands},
    debug,
};
use anyhow::{Context, Result};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Root configuration structure representing tourwithme.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Path of the config file (set after loading, may not exist)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Persisted content location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Local server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content)
            .map_err(|err| ConfigError::Toml(PathBuf::from(defaults::CONFIG_FILE), err))
    }
}

impl AppConfig {
    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load the config named by the CLI, apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)
                .with_context(|| format!("failed to load `{}`", cli.config.display()))?
        } else {
            debug!("config"; "`{}` not found, using defaults", cli.config.display());
            Self {
                config_path: cli.config.clone(),
                ..Self::default()
            }
        };

        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.storage {
            self.storage.dir = dir.clone();
        }

        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = interface.clone();
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "[storage.dir] must not be empty".into(),
            ));
        }

        if self.serve.interface.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.serve.interface
            )));
        }

        Ok(())
    }

    /// Storage directory with `~` expanded.
    pub fn storage_dir(&self) -> PathBuf {
        let raw = self.storage.dir.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();

        assert_eq!(config.storage.dir, PathBuf::from(".tourwithme"));
        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 5277);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_section_rejection() {
        let result: Result<AppConfig, _> = "[deploy]\nprovider = \"github\"".parse();

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Toml(ref path, _) if path == Path::new("tourwithme.toml")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.storage.dir = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.serve.interface = "localhost".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn test_storage_dir_expands_tilde() {
        let mut config = AppConfig::default();
        config.storage.dir = PathBuf::from("~/tourwithme");

        let dir = config.storage_dir();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("tourwithme"));
    }

    #[test]
    fn test_load_from_file_with_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tourwithme.toml");
        fs::write(
            &path,
            "[storage]\ndir = \"content-store\"\n\n[serve]\nport = 3000\n",
        )
        .unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::parse_from(["tourwithme", "-C", &path_arg, "serve", "-i", "0.0.0.0"]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.config_path, path);
        assert_eq!(config.storage.dir, PathBuf::from("content-store"));
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.interface, "0.0.0.0");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["tourwithme", "-C", &path_arg, "--storage", "/srv/site", "login"]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.storage.dir, PathBuf::from("/srv/site"));
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tourwithme.toml");
        fs::write(&path, "[serve]\nport = \"eighty\"\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["tourwithme", "-C", &path_arg, "show"]);
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to load"));

        let cause = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(cause, ConfigError::Toml(p, _) if *p == path));
        assert!(cause.to_string().contains(&*path_arg));
    }
}
