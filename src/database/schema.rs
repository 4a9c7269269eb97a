// ABOUTME: Relational schema for the recipe cache: five tables linked by foreign key
// ABOUTME: Idempotent CREATE TABLE / CREATE INDEX migration run when the store opens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CacheDatabase;
use crate::errors::{AppError, AppResult, ErrorCode};
use tracing::debug;

/// DDL statements in dependency order (parents before children)
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS query_keys (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ingredient_text TEXT NOT NULL,
        result_count INTEGER NOT NULL CHECK (result_count >= 1),
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (ingredient_text, result_count)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        query_key_id INTEGER NOT NULL REFERENCES query_keys(id) ON DELETE CASCADE,
        external_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        servings INTEGER NOT NULL DEFAULT 0 CHECK (servings >= 0)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS used_ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        external_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        amount REAL NOT NULL,
        unit TEXT NOT NULL DEFAULT ''
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS missing_ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        external_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        amount REAL NOT NULL,
        unit TEXT NOT NULL DEFAULT ''
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS nutrients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        name TEXT NOT NULL CHECK (name IN ('Calories', 'Carbohydrates', 'Protein')),
        amount REAL NOT NULL,
        unit TEXT NOT NULL DEFAULT '',
        UNIQUE (recipe_id, name)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_recipes_query_key ON recipes(query_key_id)",
    "CREATE INDEX IF NOT EXISTS idx_used_ingredients_recipe ON used_ingredients(recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_missing_ingredients_recipe ON missing_ingredients(recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_nutrients_recipe ON nutrients(recipe_id)",
];

impl CacheDatabase {
    /// Create the cache tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if any DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::from_store_error(
                        e,
                        ErrorCode::StoreUnavailable,
                        "Cache schema migration failed",
                    )
                })?;
        }
        debug!(statements = SCHEMA.len(), "Recipe cache schema up to date");
        Ok(())
    }
}
