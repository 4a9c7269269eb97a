// ABOUTME: Domain service layer for cached recipe search
// ABOUTME: Hosts the orchestrator tying the cache store to the recipe service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services are front-end agnostic: the command-line binary and the
//! integration tests drive the same orchestrator.

/// Cached recipe search: normalize, look up, then load or fetch and store
pub mod recipe_finder;

pub use recipe_finder::{CacheOrigin, RecipeFinder, SearchOutcome};
