// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for init-repo.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. init-repo.toml (repository root, optional)
//! 3. --config FILE (repeatable)
//! 4. INIT_REPO_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! INIT_REPO_GLOBAL__DRY=true             → global.dry = true
//! INIT_REPO_MANIFEST__RAW_HOST=http://…  → manifest.raw_host
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! output_log_level = 4
//!
//! [manifest]
//! branch = "release"
//! file = "firmware.xml"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, ManifestConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Manifest location options.
    pub manifest: ManifestConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use init_repo::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("init-repo.toml")
    ///     .with_env_prefix("INIT_REPO")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any section holds an invalid value.
    pub fn validate(&self) -> Result<()> {
        self.manifest.validate()?;
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file", self.global.log_file.display().to_string());
        options.insert("manifest.raw_host", self.manifest.raw_host.clone());
        options.insert("manifest.branch", self.manifest.branch.clone());
        options.insert("manifest.file", self.manifest.file.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
