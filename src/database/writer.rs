// ABOUTME: Cache writer persisting a fetched recipe graph across the five cache tables
// ABOUTME: Runs every insert inside one transaction so failures leave no partial entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::transactions::SqliteTransactionGuard;
use super::{CacheDatabase, RowId};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{IngredientUsage, QueryKey, Recipe};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, info};

const INSERT_USED: &str = r"
    INSERT INTO used_ingredients (recipe_id, external_id, name, amount, unit)
    VALUES ($1, $2, $3, $4, $5)
";

const INSERT_MISSING: &str = r"
    INSERT INTO missing_ingredients (recipe_id, external_id, name, amount, unit)
    VALUES ($1, $2, $3, $4, $5)
";

/// Row counts written by one cache write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Recipes inserted
    pub recipes: usize,
    /// Used and missing ingredient rows inserted
    pub ingredients: usize,
    /// Nutrient rows inserted
    pub nutrients: usize,
}

impl CacheDatabase {
    /// Persist `recipes` as the cached result for `key`
    ///
    /// Parents are inserted before children so every foreign key refers to an
    /// id captured earlier in the same transaction. Nothing is visible to
    /// other readers until the final commit; any failure rolls everything back.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if any insert or the commit fails (including a key
    /// that is already stored), or `StoreUnavailable` if no connection can be
    /// acquired.
    pub async fn store(&self, key: &QueryKey, recipes: &[Recipe]) -> AppResult<WriteSummary> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::from_store_error(e, ErrorCode::WriteError, "Could not begin cache write")
        })?;
        let mut guard = SqliteTransactionGuard::new(tx);

        let query_key_id = insert_query_key(guard.executor()?, key).await?;

        let mut summary = WriteSummary::default();
        for recipe in recipes {
            let conn = guard.executor()?;
            let recipe_id = insert_recipe(&mut *conn, query_key_id, recipe).await?;
            summary.nutrients += insert_nutrients(&mut *conn, recipe_id, recipe).await?;
            for usage in [IngredientUsage::Used, IngredientUsage::Missing] {
                summary.ingredients += insert_ingredients(&mut *conn, recipe_id, recipe, usage).await?;
            }
            summary.recipes += 1;
        }

        guard.commit().await?;

        info!(
            key = %key,
            query_key_id,
            recipes = summary.recipes,
            ingredients = summary.ingredients,
            nutrients = summary.nutrients,
            "Cached recipe search"
        );
        Ok(summary)
    }
}

fn write_error(error: sqlx::Error, context: &str) -> AppError {
    AppError::from_store_error(error, ErrorCode::WriteError, context)
}

async fn insert_query_key(conn: &mut SqliteConnection, key: &QueryKey) -> AppResult<RowId> {
    let result = sqlx::query(
        r"
        INSERT INTO query_keys (ingredient_text, result_count, created_at)
        VALUES ($1, $2, $3)
        ",
    )
    .bind(key.ingredient_text())
    .bind(i64::from(key.result_count()))
    .bind(Utc::now())
    .execute(conn)
    .await
    .map_err(|e| write_error(e, "Could not insert query key"))?;

    Ok(result.last_insert_rowid())
}

async fn insert_recipe(
    conn: &mut SqliteConnection,
    query_key_id: RowId,
    recipe: &Recipe,
) -> AppResult<RowId> {
    let result = sqlx::query(
        r"
        INSERT INTO recipes (query_key_id, external_id, title, servings)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(query_key_id)
    .bind(recipe.external_id)
    .bind(&recipe.title)
    .bind(i64::from(recipe.servings))
    .execute(conn)
    .await
    .map_err(|e| write_error(e, "Could not insert recipe"))?;

    Ok(result.last_insert_rowid())
}

/// Insert one row per populated nutrient slot (at most three)
async fn insert_nutrients(
    conn: &mut SqliteConnection,
    recipe_id: RowId,
    recipe: &Recipe,
) -> AppResult<usize> {
    let mut written = 0;
    for fact in recipe.nutrition.facts() {
        sqlx::query(
            r"
            INSERT INTO nutrients (recipe_id, name, amount, unit)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(recipe_id)
        .bind(fact.name())
        .bind(fact.amount)
        .bind(&fact.unit)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error(e, &format!("Could not insert {} nutrient", fact.name())))?;
        written += 1;
    }
    Ok(written)
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: RowId,
    recipe: &Recipe,
    usage: IngredientUsage,
) -> AppResult<usize> {
    let sql = match usage {
        IngredientUsage::Used => INSERT_USED,
        IngredientUsage::Missing => INSERT_MISSING,
    };

    let ingredients = recipe.ingredients(usage);
    for ingredient in ingredients {
        sqlx::query(sql)
            .bind(recipe_id)
            .bind(ingredient.external_id)
            .bind(&ingredient.name)
            .bind(ingredient.amount)
            .bind(&ingredient.unit)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    &format!("Could not insert {} ingredient", usage.as_str()),
                )
            })?;
    }

    debug!(recipe_id, usage = usage.as_str(), rows = ingredients.len(), "Inserted ingredients");
    Ok(ingredients.len())
}
