// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for benchdiff.
//!
//! Every failure is an explicit enum variant. Parsing is fail-fast: the first
//! unreadable file or malformed number aborts the whole comparison.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Metric;

/// Top-level error type for the benchdiff library.
#[derive(Debug, Error)]
pub enum BenchDiffError {
    // =========================================================================
    // Input Errors - Fail-Fast, No Partial Records
    // =========================================================================
    #[error("IO error: {context} {path} - {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {metric} value '{token}': {reason}")]
    InvalidNumber {
        metric: Metric,
        token: String,
        reason: String,
    },

    #[error("Non-finite {metric} value '{token}'")]
    NonFinite { metric: Metric, token: String },

    #[error("Invalid duration: '{token}'")]
    InvalidDuration { token: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value: {field} = {value} - {reason}")]
    InvalidConfigValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using BenchDiffError.
pub type BenchDiffResult<T> = Result<T, BenchDiffError>;
