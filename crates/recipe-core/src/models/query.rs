// ABOUTME: Canonical cache key for recipe searches and the ingredient normalizer
// ABOUTME: Sorting comma-separated tokens makes permutations share one cache entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a comma-separated ingredient list into its canonical form
///
/// Tokens are split on `,`, sorted by byte order and joined back with `,`.
/// Nothing is trimmed, lowercased or dropped: `"a,,b"` keeps its empty token
/// and `"eggs,Tomatoes,pasta"` becomes `"Tomatoes,eggs,pasta"`.
#[must_use]
pub fn normalize_ingredients(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split(',').collect();
    tokens.sort_unstable();
    tokens.join(",")
}

/// Identity of a cached search: normalized ingredients plus result count
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    ingredient_text: String,
    result_count: u32,
}

impl QueryKey {
    /// Build a key from raw user input
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the ingredient list is empty or the result
    /// count is zero.
    pub fn new(raw_ingredients: &str, result_count: u32) -> AppResult<Self> {
        let ingredient_text = normalize_ingredients(raw_ingredients);
        if ingredient_text.is_empty() {
            return Err(AppError::invalid_input(
                "You must provide a list of ingredients",
            ));
        }
        if result_count < 1 {
            return Err(AppError::invalid_input(
                "The number of recipes must be greater than zero",
            ));
        }
        Ok(Self {
            ingredient_text,
            result_count,
        })
    }

    /// Canonical comma-joined ingredient text
    #[must_use]
    pub fn ingredient_text(&self) -> &str {
        &self.ingredient_text
    }

    /// Number of recipes requested
    #[must_use]
    pub const fn result_count(&self) -> u32 {
        self.result_count
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.ingredient_text, self.result_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_capitals_sort_before_lowercase() {
        assert_eq!(
            normalize_ingredients("eggs,Tomatoes,pasta"),
            "Tomatoes,eggs,pasta"
        );
    }

    #[test]
    fn test_permutations_normalize_identically() {
        let permutations = [
            "eggs,pasta,tomatoes",
            "pasta,tomatoes,eggs",
            "tomatoes,eggs,pasta",
            "tomatoes,pasta,eggs",
        ];
        for raw in permutations {
            assert_eq!(normalize_ingredients(raw), "eggs,pasta,tomatoes");
        }
    }

    #[test]
    fn test_duplicates_and_empty_tokens_are_kept() {
        assert_eq!(normalize_ingredients("b,a,,b"), ",a,b,b");
        assert_eq!(normalize_ingredients("a,,b"), ",a,b");
        assert_eq!(normalize_ingredients(",a,b"), ",a,b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_ingredients("onion,Garlic, basil,rice");
        assert_eq!(normalize_ingredients(&once), once);
        // whitespace is part of the token
        assert_eq!(once, " basil,Garlic,onion,rice");
    }

    #[test]
    fn test_query_key_validation() {
        let key = QueryKey::new("pasta,eggs", 2).unwrap();
        assert_eq!(key.ingredient_text(), "eggs,pasta");
        assert_eq!(key.result_count(), 2);
        assert_eq!(key, QueryKey::new("eggs,pasta", 2).unwrap());
        assert_ne!(key, QueryKey::new("eggs,pasta", 3).unwrap());

        let empty = QueryKey::new("", 1).unwrap_err();
        assert_eq!(empty.code, ErrorCode::InvalidInput);

        let zero = QueryKey::new("eggs", 0).unwrap_err();
        assert_eq!(zero.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_lone_separator_is_not_empty() {
        // ",": two empty tokens, still a (degenerate) non-empty key
        let key = QueryKey::new(",", 1).unwrap();
        assert_eq!(key.ingredient_text(), ",");
    }
}
