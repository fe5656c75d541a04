// ABOUTME: Database configuration types for SQLite file and in-memory connections
// ABOUTME: Handles URL parsing and connection pool settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_parse_or;
use crate::constants::database;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests and throwaway instances)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// Accepts `sqlite::memory:`, `sqlite:<path>`, `sqlite://<path>` and a bare
    /// file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an empty path or a non-`SQLite` scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if s.starts_with("postgres://") || s.starts_with("postgresql://") || s.starts_with("mysql://")
        {
            return Err(AppError::config(format!(
                "Unsupported database URL '{s}': only SQLite is supported"
            )));
        }

        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        // Connection parameters are set programmatically
        let path_str = path_str.split('?').next().unwrap_or_default();

        match path_str {
            ":memory:" => Ok(Self::Memory),
            "" => Err(AppError::config(format!(
                "Invalid database URL '{s}': missing file path"
            ))),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// File path of a file-backed database
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::SQLite { path } => Some(path),
            Self::Memory => None,
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/recipes.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Maximum pool size for file databases (memory databases always use one)
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// `SQLite` busy timeout in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: database::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: database::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            busy_timeout_ms: database::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// In-memory configuration used by tests and benchmarks
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            ..Self::default()
        }
    }

    /// Configuration for an explicit URL with default pool settings
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed
    pub fn for_url(url: &str) -> AppResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(url)?,
            ..Self::default()
        })
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if database environment variables are invalid
    pub fn from_env() -> AppResult<Self> {
        let url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| database::DEFAULT_DATABASE_URL.to_owned());

        let max_connections: u32 =
            env_parse_or("DATABASE_MAX_CONNECTIONS", database::DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(AppError::config(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }

        Ok(Self {
            url: DatabaseUrl::parse_url(&url)?,
            max_connections,
            acquire_timeout_secs: env_parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                database::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            busy_timeout_ms: env_parse_or(
                "DATABASE_BUSY_TIMEOUT_MS",
                database::DEFAULT_BUSY_TIMEOUT_MS,
            )?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_memory_url() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert!(DatabaseUrl::Memory.is_memory());
        assert_eq!(DatabaseUrl::Memory.to_connection_string(), "sqlite::memory:");
    }

    #[test]
    fn test_parse_file_urls() {
        for raw in ["sqlite:./data/recipes.db", "sqlite://./data/recipes.db", "./data/recipes.db"] {
            let url = DatabaseUrl::parse_url(raw).unwrap();
            assert_eq!(url.file_path(), Some(Path::new("./data/recipes.db")), "{raw}");
        }
        let url = DatabaseUrl::parse_url("sqlite:recipes.db?mode=rwc").unwrap();
        assert_eq!(url.to_connection_string(), "sqlite:recipes.db");
    }

    #[test]
    fn test_rejects_unsupported_urls() {
        let error = DatabaseUrl::parse_url("postgres://localhost/recipes").unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }
}
