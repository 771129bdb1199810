// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered config loading. Later layers win:
//!
//! ```text
//! <root>/init-repo.toml          add_toml_file_optional
//! --config FILE ...               add_toml_file (must exist)
//! INIT_REPO_<SECTION>__<KEY>      with_env_prefix("INIT_REPO")
//! -b/-f/-l/--dry/--set K=V        set
//!        |
//!        v
//!    build() --> Config (deserialized, then validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use super::Config;
use crate::error::Result;

/// A config layer that contributed to the final `Config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` file; a missing file fails `build()`.
    File(PathBuf),
    /// `init-repo.toml` next to the repository; recorded only if present.
    Optional(PathBuf),
    /// TOML given in memory.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Collects config layers, then merges them into a `Config`.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Required TOML file, read at `build()`.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::File(path.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` variables, e.g. `INIT_REPO_MANIFEST__BRANCH`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override a dotted key such as `manifest.branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("invalid override '{key}': {e}"))?;
        Ok(self)
    }

    /// Merge every layer, deserialize, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, a key is
    /// unknown, or a value fails validation (log level, raw host).
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source lines for debug logging.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
