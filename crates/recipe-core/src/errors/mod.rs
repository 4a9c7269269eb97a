// ABOUTME: Unified error type for the recipe finder with phase-aware context
// ABOUTME: Defines ErrorCode taxonomy, AppError, and store/fetch error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the recipe finder returns [`AppResult`]. The
//! [`ErrorCode`] taxonomy mirrors the phases of a cached search: the store can
//! be unreachable, a read can fail or return malformed rows, the transactional
//! write can fail, and the external recipe service can fail or time out.
//!
//! Errors are never retried. Each one aborts the current search and carries the
//! [`SearchPhase`] in which it occurred so callers can tell a failed cache hit
//! apart from a failed miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller supplied an unusable ingredient list or result count
    InvalidInput,
    /// A required configuration value is absent
    ConfigMissing,
    /// A configuration value could not be parsed
    ConfigInvalid,
    /// The relational store cannot be opened or reached
    StoreUnavailable,
    /// A read during lookup or load failed or returned malformed rows
    StoreReadFailure,
    /// A step of the transactional cache write failed
    WriteError,
    /// The external recipe service failed or returned an undecodable body
    FetchFailure,
    /// A store operation or external fetch exceeded its deadline
    Timeout,
    /// Invariant violation inside the crate
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::StoreUnavailable => "The recipe cache store is unavailable",
            Self::StoreReadFailure => "Reading from the recipe cache failed",
            Self::WriteError => "Writing to the recipe cache failed",
            Self::FetchFailure => "The recipe service request failed",
            Self::Timeout => "The operation timed out",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Process exit code used by the command-line front end
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput => 2,
            Self::ConfigMissing | Self::ConfigInvalid => 3,
            Self::StoreUnavailable | Self::StoreReadFailure | Self::WriteError => 4,
            Self::FetchFailure => 5,
            Self::Timeout => 6,
            Self::InternalError => 1,
        }
    }
}

/// Phase of a cached recipe search in which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Turning the raw ingredient list into a cache key
    Normalize,
    /// Looking the key up in the store
    Decide,
    /// Loading a stored result
    Hit,
    /// Fetching from the recipe service and writing the result
    Miss,
}

impl SearchPhase {
    /// Short name used in logs and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::Decide => "decide",
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Search phase the error surfaced in, when known
    pub phase: Option<SearchPhase>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            phase: None,
            source: None,
        }
    }

    /// Tag the error with the phase it surfaced in
    ///
    /// The innermost phase wins: an error already tagged keeps its phase.
    #[must_use]
    pub fn in_phase(mut self, phase: SearchPhase) -> Self {
        if self.phase.is_none() {
            self.phase = Some(phase);
        }
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing configuration value
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Unparseable configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Store cannot be opened or reached
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Read failure or malformed row
    pub fn store_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreReadFailure, message)
    }

    /// External recipe service error
    pub fn fetch(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FetchFailure,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Deadline exceeded
    pub fn timeout(operation: impl Into<String>, secs: f64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("{} timed out after {secs:.1}s", operation.into()),
        )
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Some(phase) => write!(
                f,
                "[{phase}] {}: {}",
                self.code.description(),
                self.message
            ),
            None => write!(f, "{}: {}", self.code.description(), self.message),
        }
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(feature = "database-errors")]
impl AppError {
    /// Classify a `sqlx` error raised while talking to the cache store
    ///
    /// Connectivity failures (pool exhausted or closed, I/O, TLS) become
    /// `StoreUnavailable`; everything else is reported with `fallback`.
    #[must_use]
    pub fn from_store_error(error: sqlx::Error, fallback: ErrorCode, context: &str) -> Self {
        let code = match &error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => ErrorCode::StoreUnavailable,
            _ => fallback,
        };
        Self::new(code, format!("{context}: {error}")).with_source(error)
    }
}

#[cfg(feature = "provider-errors")]
impl AppError {
    /// Classify a `reqwest` error raised while calling the recipe service
    #[must_use]
    pub fn from_fetch_error(service: &str, error: reqwest::Error) -> Self {
        let code = if error.is_timeout() {
            ErrorCode::Timeout
        } else {
            ErrorCode::FetchFailure
        };
        Self::new(code, format!("{service}: {error}")).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_phase_when_tagged() {
        let error = AppError::store_read("bad row").in_phase(SearchPhase::Hit);
        assert_eq!(
            error.to_string(),
            "[hit] Reading from the recipe cache failed: bad row"
        );

        let untagged = AppError::invalid_input("empty ingredient list");
        assert_eq!(
            untagged.to_string(),
            "The provided input is invalid: empty ingredient list"
        );
    }

    #[test]
    fn test_innermost_phase_wins() {
        let error = AppError::fetch("Spoonacular", "HTTP 500")
            .in_phase(SearchPhase::Miss)
            .in_phase(SearchPhase::Decide);
        assert_eq!(error.phase, Some(SearchPhase::Miss));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::StoreUnavailable).unwrap();
        assert_eq!(json, "\"STORE_UNAVAILABLE\"");
        assert_eq!(ErrorCode::Timeout.exit_code(), 6);
    }
}
