// ABOUTME: Unified error types re-exported from recipe-core
// ABOUTME: Keeps crate::errors paths stable for the store, client, and orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::errors::*;
