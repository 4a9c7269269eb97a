// ABOUTME: Shared utilities for the recipe finder
// ABOUTME: Deadline wrappers used around store operations and recipe service calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Timeout wrappers returning `Timeout` errors
pub mod timeout;
