// ABOUTME: Configuration management module for the recipe finder
// ABOUTME: Groups environment parsing and cache store location settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: API credentials, endpoints and deadlines
//! - **Database**: cache store location and connection options

/// Cache store location and connection options
pub mod database;
/// Environment-based runtime configuration
pub mod environment;

pub use database::DatabaseUrl;
pub use environment::RecipeFinderConfig;
