// ABOUTME: Cache lookup finding a stored search by its normalized query key
// ABOUTME: Read-only; reports duplicate keys as malformed store contents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheDatabase, RowId};
use crate::constants::tables;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::QueryKey;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::debug;

/// Handle to a stored search, returned by a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedQuery {
    /// Surrogate id of the `query_keys` row
    pub id: RowId,
    /// The key the entry was stored under
    pub key: QueryKey,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
}

impl CacheDatabase {
    /// Find the stored search for `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot be reached and
    /// `StoreReadFailure` if the read fails or finds more than one entry.
    pub async fn lookup(&self, key: &QueryKey) -> AppResult<Option<CachedQuery>> {
        let rows = sqlx::query(
            r"
            SELECT id, created_at
            FROM query_keys
            WHERE ingredient_text = $1 AND result_count = $2
            LIMIT 2
            ",
        )
        .bind(key.ingredient_text())
        .bind(i64::from(key.result_count()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_store_error(e, ErrorCode::StoreUnavailable, "Cache lookup failed")
        })?;

        if rows.len() > 1 {
            return Err(AppError::store_read(format!(
                "Multiple cache entries stored for {key}"
            )));
        }

        let Some(row) = rows.first() else {
            debug!(key = %key, "No cached entry");
            return Ok(None);
        };

        let id: RowId = row
            .try_get("id")
            .map_err(|e| AppError::store_read(format!("Malformed {} row: {e}", tables::QUERY_KEYS)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AppError::store_read(format!("Malformed {} row: {e}", tables::QUERY_KEYS)))?;

        debug!(key = %key, query_key_id = id, %created_at, "Found cached entry");
        Ok(Some(CachedQuery {
            id,
            key: key.clone(),
            created_at,
        }))
    }
}
