// ABOUTME: Main library entry point for the recipe finder
// ABOUTME: Ingredient-based recipe search with a relational query-result cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Finder
//!
//! Answers "which recipes can be made from these ingredients, what is still
//! missing, and what is their nutrition?" by asking an external recipe
//! service, then caches the nested answer in `SQLite` so the same ingredient
//! set never costs a second round trip.
//!
//! ## Architecture
//!
//! - **Models**: cache key normalization and the recipe graph (`recipe-core`)
//! - **Database**: five-table cache with lookup, load, and transactional write
//! - **External**: the recipe service seam and its Spoonacular client
//! - **Services**: the orchestrator deciding between cache hit and miss
//! - **Config**: environment-driven credentials, store location, deadlines
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_finder::config::RecipeFinderConfig;
//! use recipe_finder::errors::AppResult;
//! use recipe_finder::services::RecipeFinder;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = RecipeFinderConfig::from_env()?;
//!     let finder = RecipeFinder::from_config(&config).await?;
//!
//!     let outcome = finder.find_recipes("eggs,pasta,tomatoes", 2).await?;
//!     println!("{} recipes ({:?})", outcome.recipes.len(), outcome.origin);
//!
//!     Ok(())
//! }
//! ```

/// Environment configuration and store URL parsing
pub mod config;

/// Constants shared across the crate
pub mod constants;

/// Relational recipe cache store
pub mod database;

/// Unified error handling with phase-tagged error codes
pub mod errors;

/// External recipe service clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// Cache key and recipe graph models
pub mod models;

/// Cached recipe search orchestration
pub mod services;

/// Utility functions and helpers
pub mod utils;
