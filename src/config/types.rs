// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for init-repo.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ManifestConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Raw-content endpoint serving files of GitHub repositories.
pub const DEFAULT_RAW_HOST: &str = "https://raw.githubusercontent.com";

/// Revision the manifest is fetched from when none is given.
pub const DEFAULT_BRANCH: &str = "main";

/// Manifest file fetched when none is given.
pub const DEFAULT_MANIFEST_FILE: &str = "default.xml";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Plan submodule actions without changing the repository.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// Where manifests are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Base URL of the raw-content host (no trailing slash).
    pub raw_host: String,
    /// Default revision used when `--branch` is not given.
    pub branch: String,
    /// Default manifest file used when `--file` is not given.
    pub file: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            raw_host: DEFAULT_RAW_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }
}

impl ManifestConfig {
    /// Validate the manifest settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `raw_host` is not an http(s) URL
    /// or `branch`/`file` are empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            section: "manifest".to_string(),
            key: key.to_string(),
            message,
        };

        if reqwest::Url::parse(&self.raw_host)
            .ok()
            .is_none_or(|url| !matches!(url.scheme(), "http" | "https"))
        {
            return Err(invalid(
                "raw_host",
                format!("expected an http(s) url, got '{}'", self.raw_host),
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(invalid("branch", "must not be empty".to_string()));
        }
        if self.file.trim().is_empty() {
            return Err(invalid("file", "must not be empty".to_string()));
        }
        Ok(())
    }
}
