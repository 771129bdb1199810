// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The init command: resolve the manifest, then synchronize submodules.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, bail_out};
use crate::git::GitBackend;
use crate::manifest::resolver::resolve;
use crate::manifest::source::RawContentSource;
use crate::submodule::{SyncReport, Synchronizer};

/// Repository root: `directory` if given, otherwise the current directory.
///
/// # Errors
///
/// Returns an error if the directory does not exist or the current directory
/// cannot be determined.
pub fn resolve_root(directory: Option<&Path>) -> Result<PathBuf> {
    let root = match directory {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    if !root.is_dir() {
        return Err(bail_out(format!("directory '{}' does not exist", root.display())).into());
    }
    Ok(root)
}

/// Run the init command against the repository at `root`.
///
/// # Errors
///
/// Returns the first manifest, network, git, or filesystem error encountered.
pub async fn run_init_command<G: GitBackend>(
    git: &G,
    url: &str,
    root: &Path,
    config: &Config,
) -> Result<SyncReport> {
    for line in config.format_options() {
        debug!("option {line}");
    }

    let dry = config.global.dry;
    if !git.is_git_repo(root) {
        info!("initializing git repository in {}", root.display());
        if !dry {
            git.init_repo(root)?;
        }
    }

    let manifest_config = &config.manifest;
    let source = RawContentSource::new(&manifest_config.raw_host, url, &manifest_config.branch)?;
    info!(
        revision = %manifest_config.branch,
        "resolving {} from {}",
        manifest_config.file,
        source.base()
    );
    let manifest = resolve(&source, &manifest_config.file)
        .await
        .with_context(|| format!("failed to resolve manifest '{}'", manifest_config.file))?;

    let report = Synchronizer::new(git, root)
        .dry_run(dry)
        .run(&manifest)
        .await?;
    info!("{}", report.summary());
    Ok(report)
}

/// Sync report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_report_json(report: &SyncReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize sync report")
}
