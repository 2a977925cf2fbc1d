//! Store configuration and database initialization.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Open a migrated connection for the configured location.
//!
//! # Invariants
//! - An unset `DATABASE_URI` means a private in-memory database.
//! - `LOG_DIR`, when set, must be an absolute path.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATABASE_URI_VAR: &str = "DATABASE_URI";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

const MEMORY_URI: &str = ":memory:";
const SQLITE_SCHEME: &str = "sqlite";

/// Where the pet table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parses a database URI.
    ///
    /// Accepted forms follow the SQLAlchemy slash convention:
    /// - `:memory:`, `sqlite://`, `sqlite:///:memory:`, `sqlite::memory:` -> memory
    /// - `sqlite:///pets.db` -> relative path `pets.db`
    /// - `sqlite:////var/lib/pets.db` -> absolute path `/var/lib/pets.db`
    /// - a bare path without a scheme -> that path
    ///
    /// Any other `scheme://` and `sqlite:` without slashes are rejected.
    pub fn parse(uri: &str) -> Result<Self, ConfigError> {
        let trimmed = uri.trim();
        let invalid = |reason| ConfigError::InvalidValue {
            key: DATABASE_URI_VAR,
            value: uri.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("database path cannot be empty"));
        }
        if trimmed == MEMORY_URI || trimmed == "sqlite::memory:" {
            return Ok(Self::Memory);
        }

        if let Some((scheme, rest)) = trimmed.split_once("://") {
            if scheme != SQLITE_SCHEME {
                return Err(invalid("unsupported scheme; only sqlite:// is accepted"));
            }
            if rest.is_empty() {
                return Ok(Self::Memory);
            }
            return match rest.strip_prefix('/') {
                Some(MEMORY_URI) => Ok(Self::Memory),
                Some("") => Err(invalid("database path cannot be empty")),
                Some(path) => Ok(Self::File(PathBuf::from(path))),
                None => Err(invalid("expected sqlite:///PATH; hosts are not supported")),
            };
        }

        if trimmed.starts_with("sqlite:") {
            return Err(invalid("expected sqlite:///PATH"));
        }
        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key} value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for the pet store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: DatabaseLocation,
    pub log_level: String,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds settings from `(key, value)` pairs; unknown keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            match key.as_ref() {
                DATABASE_URI_VAR => config.database = DatabaseLocation::parse(&value.into())?,
                LOG_LEVEL_VAR => config.log_level = value.into(),
                LOG_DIR_VAR => {
                    let value = value.into();
                    if !Path::new(value.trim()).is_absolute() {
                        return Err(ConfigError::InvalidValue {
                            key: LOG_DIR_VAR,
                            value,
                            reason: "must be an absolute path",
                        });
                    }
                    config.log_dir = Some(PathBuf::from(value.trim()));
                }
                _ => {}
            }
        }
        Ok(config)
    }
}

/// Opens and migrates the configured database.
pub fn init_db(config: &StoreConfig) -> DbResult<Connection> {
    info!("event=db_init module=config status=start");
    match &config.database {
        DatabaseLocation::Memory => open_db_in_memory(),
        DatabaseLocation::File(path) => open_db(path),
    }
}
