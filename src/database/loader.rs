// ABOUTME: Cache loader rebuilding the nested recipe graph of a stored search
// ABOUTME: One query for recipes, then used, missing, and nutrient rows per recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheDatabase, CachedQuery, RowId};
use crate::constants::tables;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    IngredientRef, IngredientUsage, NamedNutrient, NutritionSummary, Recipe,
};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

const SELECT_USED: &str = r"
    SELECT external_id, name, amount, unit
    FROM used_ingredients
    WHERE recipe_id = $1
    ORDER BY id
";

const SELECT_MISSING: &str = r"
    SELECT external_id, name, amount, unit
    FROM missing_ingredients
    WHERE recipe_id = $1
    ORDER BY id
";

impl CacheDatabase {
    /// Load every recipe of a stored search with its ingredients and nutrition
    ///
    /// Cache hits come from interactive invocations, so the traversal is a
    /// plain 1-to-N-to-N walk without batching.
    ///
    /// # Errors
    ///
    /// Returns `StoreReadFailure` if any read fails or any row is malformed;
    /// no partial recipe list is returned.
    pub async fn load(&self, cached: &CachedQuery) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, external_id, title, servings
            FROM recipes
            WHERE query_key_id = $1
            ORDER BY id
            ",
        )
        .bind(cached.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error(e, "Could not select recipe rows"))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            let recipe_id: RowId = column(row, "id", tables::RECIPES)?;
            let servings: i64 = column(row, "servings", tables::RECIPES)?;
            let servings = u32::try_from(servings).map_err(|_| {
                AppError::store_read(format!(
                    "Malformed recipes row {recipe_id}: servings {servings} out of range"
                ))
            })?;

            let mut recipe = Recipe {
                external_id: column(row, "external_id", tables::RECIPES)?,
                title: column(row, "title", tables::RECIPES)?,
                servings,
                used_ingredients: Vec::new(),
                missing_ingredients: Vec::new(),
                nutrition: NutritionSummary::default(),
            };

            for usage in [IngredientUsage::Used, IngredientUsage::Missing] {
                *recipe.ingredients_mut(usage) = self.load_ingredients(recipe_id, usage).await?;
            }
            recipe.nutrition = self.load_nutrition(recipe_id).await?;

            recipes.push(recipe);
        }

        debug!(
            query_key_id = cached.id,
            recipes = recipes.len(),
            "Loaded cached recipes"
        );
        Ok(recipes)
    }

    async fn load_ingredients(
        &self,
        recipe_id: RowId,
        usage: IngredientUsage,
    ) -> AppResult<Vec<IngredientRef>> {
        let (sql, table) = match usage {
            IngredientUsage::Used => (SELECT_USED, tables::USED_INGREDIENTS),
            IngredientUsage::Missing => (SELECT_MISSING, tables::MISSING_INGREDIENTS),
        };

        let rows = sqlx::query(sql)
            .bind(recipe_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, &format!("Could not select {table} rows")))?;

        rows.iter()
            .map(|row| -> AppResult<IngredientRef> {
                Ok(IngredientRef {
                    external_id: column(row, "external_id", table)?,
                    name: column(row, "name", table)?,
                    amount: column(row, "amount", table)?,
                    unit: column(row, "unit", table)?,
                })
            })
            .collect()
    }

    async fn load_nutrition(&self, recipe_id: RowId) -> AppResult<NutritionSummary> {
        let rows = sqlx::query(
            r"
            SELECT name, amount, unit
            FROM nutrients
            WHERE recipe_id = $1
            ORDER BY id
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error(e, "Could not select nutrients rows"))?;

        let named = rows
            .iter()
            .map(|row| -> AppResult<NamedNutrient> {
                Ok(NamedNutrient {
                    name: column(row, "name", tables::NUTRIENTS)?,
                    amount: column(row, "amount", tables::NUTRIENTS)?,
                    unit: column(row, "unit", tables::NUTRIENTS)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(NutritionSummary::from_named(&named))
    }
}

fn read_error(error: sqlx::Error, context: &str) -> AppError {
    AppError::from_store_error(error, ErrorCode::StoreReadFailure, context)
}

/// Decode one column, reporting type or name mismatches as malformed rows
fn column<'r, T>(row: &'r SqliteRow, name: &str, table: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::store_read(format!("Malformed {table} row, column {name}: {e}")))
}
