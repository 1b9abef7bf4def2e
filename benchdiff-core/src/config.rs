// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML report configuration.
//!
//! Every field is optional; a missing file section falls back to the defaults
//! used for the sidecar vs eBPF comparison. Example:
//!
//! ```yaml
//! report:
//!   baseline_label: Istio
//!   candidate_label: Cilium
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{BenchDiffError, BenchDiffResult};

/// Raw report section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReportConfig {
    #[serde(default = "default_baseline_label")]
    baseline_label: String,
    #[serde(default = "default_candidate_label")]
    candidate_label: String,
}

fn default_baseline_label() -> String {
    "Sidecar".to_string()
}

fn default_candidate_label() -> String {
    "eBPF".to_string()
}

impl Default for RawReportConfig {
    fn default() -> Self {
        Self {
            baseline_label: default_baseline_label(),
            candidate_label: default_candidate_label(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    report: RawReportConfig,
}

/// Validated settings for the human-readable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Heading of the baseline block
    pub baseline_label: String,
    /// Heading of the candidate block
    pub candidate_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            baseline_label: default_baseline_label(),
            candidate_label: default_candidate_label(),
        }
    }
}

/// Configuration loader with validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchDiffResult<ReportConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchDiffError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchDiffError::Io {
            context: "reading config file",
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> BenchDiffResult<ReportConfig> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchDiffError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> BenchDiffResult<ReportConfig> {
        let RawReportConfig {
            baseline_label,
            candidate_label,
        } = raw.report;

        for (field, value) in [
            ("baseline_label", &baseline_label),
            ("candidate_label", &candidate_label),
        ] {
            if value.trim().is_empty() {
                return Err(BenchDiffError::InvalidConfigValue {
                    field,
                    value: value.clone(),
                    reason: "Label cannot be empty".to_string(),
                });
            }
        }

        Ok(ReportConfig {
            baseline_label,
            candidate_label,
        })
    }
}
