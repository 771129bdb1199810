// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module: unauthenticated manifest fetches.
//!
//! ```text
//! Fetcher::new()
//!   .url()
//!        |
//!        v
//!   fetch_string()  GET, no auth, redirects per reqwest defaults
//!        |
//!        +--> 2xx     body as String
//!        +--> non-2xx NetworkError::HttpError
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```

use crate::error::{InitResult, NetworkError};
use reqwest::Client;
use std::sync::OnceLock;
use tracing::debug;

/// Global HTTP client - initialized once, reused across all fetches.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("init-repo/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// HTTP fetcher for small text documents.
///
/// # Example
/// ```ignore
/// use init_repo::net::Fetcher;
///
/// let xml = Fetcher::new()
///     .url("https://raw.githubusercontent.com/org/manifest/main/default.xml")
///     .fetch_string()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: Option<String>,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Create a new fetcher sharing the global client.
    /// User-Agent is set to "init-repo/VERSION"
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
        }
    }

    /// Set the URL to fetch.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Fetch the configured URL and return the body as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured, the request fails, or the
    /// server answers with a non-success status code.
    pub async fn fetch_string(&self) -> InitResult<String> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))?;

        debug!(url = %url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let text = response.text().await.map_err(NetworkError::Reqwest)?;
        Ok(text)
    }
}
