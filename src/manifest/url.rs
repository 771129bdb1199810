// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw-content URL construction.
//!
//! ```text
//! https://github.com/org/manifest.git  ─┐
//! git@github.com:org/manifest.git      ─┴─> RepoLocation { github.com, org/manifest }
//!
//! {raw_host}/{org/manifest}/{revision}/{file}
//! ```
//!
//! Only GitHub is recognized. Other hosts fail with
//! [`ManifestError::UnsupportedHost`] instead of guessing a layout.

use reqwest::Url;

use crate::error::{InitResult, ManifestError};

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Split the `user@host:path` form used by ssh remotes.
fn split_scp_like(repo_url: &str) -> Option<(&str, &str)> {
    if repo_url.contains("://") {
        return None;
    }
    let (user_host, path) = repo_url.split_once(':')?;
    let (_, host) = user_host.split_once('@')?;
    (!host.is_empty() && !path.is_empty()).then_some((host, path))
}

/// Host and repository path extracted from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// Lowercased host name.
    pub host: String,
    /// `owner/repository`, without `.git` or surrounding slashes.
    pub path: String,
}

impl RepoLocation {
    /// Parse an https or scp-style repository URL.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::InvalidRepoUrl` if the URL cannot be parsed,
    /// has no host, or its path is not `owner/repository`.
    pub fn parse(repo_url: &str) -> InitResult<Self> {
        let invalid = |message: &str| ManifestError::InvalidRepoUrl {
            url: repo_url.to_string(),
            message: message.to_string(),
        };

        let (host, raw_path) = if let Some((host, path)) = split_scp_like(repo_url) {
            (host.to_string(), path.to_string())
        } else {
            let url = Url::parse(repo_url).map_err(|e| invalid(&e.to_string()))?;
            let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
            (host.to_string(), url.path().to_string())
        };

        let path = raw_path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path).trim_end_matches('/');
        if path.split('/').filter(|s| !s.is_empty()).count() < 2 {
            return Err(invalid("expected an owner/repository path").into());
        }

        Ok(Self {
            host: host.to_ascii_lowercase(),
            path: path.to_string(),
        })
    }

    /// Whether the host serves raw files under the GitHub layout.
    #[must_use]
    pub fn is_github(&self) -> bool {
        GITHUB_HOSTS.contains(&self.host.as_str())
    }
}

/// Base URL under which every manifest of `repo_url` at `revision` lives.
///
/// # Errors
///
/// Returns `ManifestError::InvalidRepoUrl` for unparsable URLs and
/// `ManifestError::UnsupportedHost` for hosts other than GitHub.
pub fn manifest_base(raw_host: &str, repo_url: &str, revision: &str) -> InitResult<String> {
    let location = RepoLocation::parse(repo_url)?;
    if !location.is_github() {
        return Err(ManifestError::UnsupportedHost {
            host: location.host,
        }
        .into());
    }
    Ok(format!(
        "{}/{}/{}",
        raw_host.trim_end_matches('/'),
        location.path,
        revision.trim_matches('/')
    ))
}

/// URL of `file` in `repo_url` at `revision`.
///
/// # Errors
///
/// See [`manifest_base`].
pub fn manifest_url(
    raw_host: &str,
    repo_url: &str,
    revision: &str,
    file: &str,
) -> InitResult<String> {
    let base = manifest_base(raw_host, repo_url, revision)?;
    Ok(join_file(&base, file))
}

pub(crate) fn join_file(base: &str, file: &str) -> String {
    format!("{base}/{}", normalize_file(file))
}

/// Manifest path relative to the repository root: `/a.xml` and `./a.xml` are `a.xml`.
pub(crate) fn normalize_file(mut file: &str) -> &str {
    loop {
        let trimmed = file.trim_start_matches('/');
        match trimmed.strip_prefix("./") {
            Some(rest) => file = rest,
            None => return trimmed,
        }
    }
}
