// ABOUTME: Environment configuration for the recipe finder cache and recipe service
// ABOUTME: Parses store location, API credentials, deadlines, and pool size from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Credentials and endpoints are never compiled in. They are read once at
//! start-up into a [`RecipeFinderConfig`] which is then handed to the store and
//! the orchestrator.

use super::database::DatabaseUrl;
use crate::constants::{defaults, env_vars, service};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Complete runtime configuration for a recipe search
#[derive(Clone)]
pub struct RecipeFinderConfig {
    /// Where the relational cache lives
    pub store_connection: DatabaseUrl,
    /// Recipe service API key
    pub api_key: String,
    /// Recipe service base URL, without trailing slash
    pub api_base_url: String,
    /// Deadline for each external fetch
    pub fetch_timeout: Duration,
    /// Deadline for each store operation
    pub store_timeout: Duration,
    /// Connection pool size for file-backed stores
    pub max_connections: u32,
}

impl RecipeFinderConfig {
    /// Configuration with defaults for everything but the API key
    #[must_use]
    pub fn new(store_connection: DatabaseUrl, api_key: impl Into<String>) -> Self {
        Self {
            store_connection,
            api_key: api_key.into(),
            api_base_url: service::DEFAULT_BASE_URL.to_owned(),
            fetch_timeout: Duration::from_secs(defaults::FETCH_TIMEOUT_SECS),
            store_timeout: Duration::from_secs(defaults::STORE_TIMEOUT_SECS),
            max_connections: defaults::MAX_CONNECTIONS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the API key is not set and `ConfigInvalid`
    /// if any value cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with_api_key(None)
    }

    /// Load configuration from environment variables, preferring `api_key` when given
    ///
    /// # Errors
    ///
    /// Same as [`RecipeFinderConfig::from_env`], except that the API key
    /// variable is not required when an override is passed.
    pub fn from_env_with_api_key(api_key: Option<String>) -> AppResult<Self> {
        let store_connection =
            DatabaseUrl::parse_url(&env_var_or(env_vars::DATABASE_URL, defaults::DATABASE_URL))?;

        let api_key = api_key
            .or_else(|| env::var(env_vars::API_KEY).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!("{} must be set", env_vars::API_KEY))
            })?;

        let config = Self {
            store_connection,
            api_key,
            api_base_url: normalize_base_url(&env_var_or(
                env_vars::API_BASE_URL,
                service::DEFAULT_BASE_URL,
            )),
            fetch_timeout: Duration::from_secs(parse_env(
                env_vars::FETCH_TIMEOUT_SECS,
                defaults::FETCH_TIMEOUT_SECS,
            )?),
            store_timeout: Duration::from_secs(parse_env(
                env_vars::STORE_TIMEOUT_SECS,
                defaults::STORE_TIMEOUT_SECS,
            )?),
            max_connections: parse_env(env_vars::MAX_CONNECTIONS, defaults::MAX_CONNECTIONS)?,
        };

        info!(
            store = %config.store_connection,
            api_base_url = %config.api_base_url,
            fetch_timeout_secs = config.fetch_timeout.as_secs(),
            store_timeout_secs = config.store_timeout.as_secs(),
            "Loaded recipe finder configuration"
        );

        Ok(config)
    }

    /// Override the base URL (trailing slashes are dropped)
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }
}

// API key stays out of logs and panic messages
impl fmt::Debug for RecipeFinderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeFinderConfig")
            .field("store_connection", &self.store_connection)
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("store_timeout", &self.store_timeout)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a numeric environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value {raw:?}: {e}"))),
        Err(_) => Ok(default),
    }
}
