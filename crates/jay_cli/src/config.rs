//! Runtime configuration.
//!
//! Precedence: command-line flag, then environment variable (both via clap),
//! then platform data directory defaults.

use crate::cli::GlobalArgs;
use directories::ProjectDirs;
use jay_core::default_log_level;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STORE_FILE_NAME: &str = "jay.db";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a home directory; pass --db and --log-dir")]
    NoHomeDirectory,
    #[error("cannot resolve `{}`: {source}", .path.display())]
    CurrentDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn resolve(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let db_path = match &args.db {
            Some(path) => absolutize(path)?,
            None => default_data_dir()?.join(STORE_FILE_NAME),
        };
        let log_dir = match &args.log_dir {
            Some(path) => absolutize(path)?,
            None => default_data_dir()?.join(LOG_DIR_NAME),
        };
        let log_level = args
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "jay")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|source| ConfigError::CurrentDirectory {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use crate::cli::GlobalArgs;
    use jay_core::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn explicit_paths_win_and_are_made_absolute() {
        let args = GlobalArgs {
            db: Some(PathBuf::from("store/jay.db")),
            log_dir: Some(PathBuf::from("/var/log/jay")),
            log_level: Some("warn".to_string()),
        };

        let config = Config::resolve(&args).unwrap();
        assert!(config.db_path.is_absolute());
        assert!(config.db_path.ends_with("store/jay.db"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/jay"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn missing_level_falls_back_to_build_default() {
        let args = GlobalArgs {
            db: Some(PathBuf::from("/tmp/jay/jay.db")),
            log_dir: Some(PathBuf::from("/tmp/jay/logs")),
            log_level: None,
        };

        let config = Config::resolve(&args).unwrap();
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn config_errors_name_the_offending_path() {
        let err = ConfigError::CurrentDirectory {
            path: PathBuf::from("store/jay.db"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("cannot resolve `store/jay.db`"));
    }
}
