// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Where manifest files come from.
//!
//! ```text
//! ManifestSource::fetch(file)
//!   RawContentSource   {base}/{file} over HTTP
//!   (tests)            in-memory map
//! ```

use std::future::Future;

use super::url::{join_file, manifest_base};
use crate::error::InitResult;
use crate::net::Fetcher;

/// Fetches manifest files by name from one repository at one revision.
pub trait ManifestSource {
    /// Human-readable location of `file`, used in logs.
    fn describe(&self, file: &str) -> String;

    /// Fetch the raw XML of `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be retrieved.
    fn fetch(&self, file: &str) -> impl Future<Output = InitResult<String>> + Send;
}

/// Manifests served by a raw-content host (e.g. `raw.githubusercontent.com`).
#[derive(Debug, Clone)]
pub struct RawContentSource {
    base: String,
}

impl RawContentSource {
    /// Source for `repo_url` at `revision`, served from `raw_host`.
    ///
    /// # Errors
    ///
    /// Returns a `ManifestError` if the repository URL is invalid or its host
    /// is not supported.
    pub fn new(raw_host: &str, repo_url: &str, revision: &str) -> InitResult<Self> {
        Ok(Self {
            base: manifest_base(raw_host, repo_url, revision)?,
        })
    }

    /// Base URL every manifest file is resolved against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl ManifestSource for RawContentSource {
    fn describe(&self, file: &str) -> String {
        join_file(&self.base, file)
    }

    fn fetch(&self, file: &str) -> impl Future<Output = InitResult<String>> + Send {
        let fetcher = Fetcher::new().url(join_file(&self.base, file));
        async move { fetcher.fetch_string().await }
    }
}
