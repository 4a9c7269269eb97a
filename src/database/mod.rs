// ABOUTME: Relational recipe cache store built on a SQLite connection pool
// ABOUTME: Owns connection setup and splits lookup, load, and write across submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Cache Store
//!
//! A cached search is flattened into five tables linked by foreign key:
//!
//! ```text
//! query_keys ─┬─< recipes ─┬─< used_ingredients
//!             │            ├─< missing_ingredients
//!             │            └─< nutrients (≤ 3 per recipe)
//! ```
//!
//! - [`CacheDatabase::lookup`] finds a stored search by its normalized key;
//! - [`CacheDatabase::load`] rebuilds the nested recipe graph of a stored search;
//! - [`CacheDatabase::store`] writes a fetched graph inside one transaction.
//!
//! Entries are permanent: nothing here updates or deletes cached rows.

mod loader;
mod lookup;
mod schema;
/// RAII transaction guard used by the cache writer
pub mod transactions;
mod writer;

pub use lookup::CachedQuery;
pub use writer::WriteSummary;

use crate::config::{DatabaseUrl, RecipeFinderConfig};
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::time::Duration;
use tracing::{debug, info};

/// Surrogate id of a stored row
pub type RowId = i64;

/// Database manager for the recipe cache
#[derive(Clone)]
pub struct CacheDatabase {
    pool: Pool<Sqlite>,
}

impl CacheDatabase {
    /// Open the store described by `config` and create the schema if needed
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot be opened and
    /// `ConfigInvalid` if the URL is malformed.
    pub async fn connect(config: &RecipeFinderConfig) -> AppResult<Self> {
        Self::open(
            &config.store_connection,
            config.max_connections,
            config.store_timeout,
        )
        .await
    }

    /// Open a store at `url` with an explicit pool size and acquire deadline
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot be opened or migrated.
    pub async fn open(
        url: &DatabaseUrl,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::store_unavailable(format!(
                        "Could not create directory {} for the cache store: {e}",
                        parent.display()
                    ))
                    .with_source(e)
                })?;
            }
        }

        let options = url.connect_options()?;
        let max_connections = url.effective_max_connections(max_connections);
        debug!(store = %url, max_connections, "Opening recipe cache store");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout);
        if matches!(url, DatabaseUrl::Memory) {
            // The database lives only as long as its single connection
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::store_unavailable(format!("Could not open database {url}: {e}"))
                    .with_source(e)
            })?;

        let db = Self { pool };
        db.migrate().await?;

        info!(store = %url, "Recipe cache store ready");
        Ok(db)
    }

    /// Open a throwaway in-memory store
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if `SQLite` cannot be initialized.
    pub async fn in_memory() -> AppResult<Self> {
        Self::open(&DatabaseUrl::Memory, 1, Duration::from_secs(5)).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
