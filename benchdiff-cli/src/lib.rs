// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! benchdiff CLI
//!
//! Shared pieces of the `parse-bench`, `bench-load` and `bench-app` binaries.

pub mod app;
pub mod loadgen;
pub mod logging;

pub use loadgen::{LoadConfig, LoadError, LoadGenerator};
