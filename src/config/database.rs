// ABOUTME: Database configuration types for the SQLite recipe cache store
// ABOUTME: Parses store URLs and builds SQLx connection options and pool settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnectOptions;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

/// Type-safe cache store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// Accepts `sqlite:<path>`, `sqlite://<path>`, `sqlite::memory:` and bare
    /// file paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an empty URL or a non-SQLite scheme.
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::config_invalid("Database URL cannot be empty"));
        }

        if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            let path_str = rest.strip_prefix("//").unwrap_or(rest);
            if path_str == ":memory:" {
                return Ok(Self::Memory);
            }
            if path_str.is_empty() {
                return Err(AppError::config_invalid(format!(
                    "Database URL has no path: {s}"
                )));
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }

        if trimmed.contains("://") {
            return Err(AppError::config_invalid(format!(
                "Unsupported database URL scheme (only sqlite is supported): {s}"
            )));
        }

        // Fallback: treat as SQLite file path
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Pool size to use for this store
    ///
    /// Every connection to `sqlite::memory:` opens a separate empty database,
    /// so in-memory stores are pinned to a single connection.
    #[must_use]
    pub const fn effective_max_connections(&self, configured: u32) -> u32 {
        match self {
            Self::Memory => 1,
            Self::SQLite { .. } => {
                if configured == 0 {
                    1
                } else {
                    configured
                }
            }
        }
    }

    /// Build `SQLx` connect options, creating the database file if needed
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if `SQLx` rejects the connection string.
    pub fn connect_options(&self) -> AppResult<SqliteConnectOptions> {
        let options = SqliteConnectOptions::from_str(&self.to_connection_string())
            .map_err(|e| AppError::config_invalid(format!("Invalid database URL {self}: {e}")))?;
        Ok(options.create_if_missing(true).foreign_keys(true))
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
