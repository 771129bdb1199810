// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for init-repo using clap derive.
//!
//! # Invocation
//!
//! ```text
//! init-repo [global options] -u <URL> [-b <REVISION>] [-f <FILE>] [-C <DIR>]
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Config file looked up in the repository root.
pub const DEFAULT_CONFIG_FILE: &str = "init-repo.toml";

/// Environment prefix for config overrides (`INIT_REPO_MANIFEST__BRANCH=...`).
pub const ENV_PREFIX: &str = "INIT_REPO";

/// Manifest Submodule Bootstrapper
///
/// Fetches a repo-style XML manifest and mirrors its projects as git submodules.
#[derive(Debug, Parser)]
#[command(
    name = "init-repo",
    author,
    version,
    about = "Manifest Submodule Bootstrapper",
    long_about = "init-repo Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches a repo-style XML manifest (and every manifest it\n\
                  includes) from a GitHub repository and makes each listed\n\
                  project a git submodule of the current repository, checked\n\
                  out at the revision the manifest names.",
    after_help = "CONFIG FILES:\n\n\
                  init-repo reads `init-repo.toml` from the repository root\n\
                  (--directory, else the current directory) if present, then\n\
                  every file given with --config, in order. Later\n\
                  files override earlier ones. INIT_REPO_<SECTION>__<KEY>\n\
                  environment variables override files, and command-line flags\n\
                  override everything."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Repository hosting the manifest (https or git@ form).
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: String,

    /// Revision the manifest is fetched at [default: main].
    #[arg(short = 'b', long = "branch", value_name = "REVISION")]
    pub branch: Option<String>,

    /// Manifest file name [default: default.xml].
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<String>,

    /// Parent repository root [default: current directory].
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Print the sync report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Config loader with every source this invocation names, overrides last.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is malformed.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new().add_toml_file_optional(self.default_config_file());
        for path in &self.global.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);

        for (key, value) in self.to_config_overrides()? {
            loader = loader.set(&key, value)?;
        }
        Ok(loader)
    }

    /// `init-repo.toml` inside `--directory`, or in the current directory.
    #[must_use]
    pub fn default_config_file(&self) -> PathBuf {
        self.directory
            .as_deref()
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Command-line values as `(key, value)` config overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is malformed.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = self.global.to_config_overrides()?;
        if let Some(ref branch) = self.branch {
            overrides.push(("manifest.branch".to_string(), branch.clone()));
        }
        if let Some(ref file) = self.file {
            overrides.push(("manifest.file".to_string(), file.clone()));
        }
        Ok(overrides)
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
