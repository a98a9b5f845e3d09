//! Optional TOML configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve where the store database and logs live.
//! - Fall back to platform defaults when no file exists.
//!
//! # Invariants
//! - A missing config file is not an error; a malformed one is.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "TRACKBOOK_CONFIG";

const APP_DIR_NAME: &str = "trackbook";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "trackbook.sqlite3";

/// Core runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default = "default_level_string")]
    pub log_level: String,
    /// Logging stays disabled when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_level_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads from `$TRACKBOOK_CONFIG` or the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match resolve_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })
    }
}

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                message,
            } => write!(f, "failed to parse config `{}`: {message}", path.display()),
            Self::Parse {
                path: None,
                message,
            } => write!(f, "failed to parse config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.ends_with("trackbook/trackbook.sqlite3"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CoreConfig::from_toml_str(
            r#"
            db_path = "/data/tracker.sqlite3"
            log_level = "warn"
            log_dir = "/var/log/trackbook"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/tracker.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/trackbook")));
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = [").unwrap();

        let err = CoreConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: Some(_), .. }));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
