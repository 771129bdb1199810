// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               InitError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+-----+-----+
//!   |      |      |       |      |     |     |
//!   v      v      v       v      v     v     v
//! Bail  Manifest Net    Sync   Git   Cfg   Fs/Io/Other
//!       Box      Box    Box    Box   Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Manifest UnsupportedHost, Parse, MissingRemote, IncludeCycle
//!   Network  Reqwest, HttpError, InvalidUrl
//!   Sync     UnknownRemote
//!   Git      Gix, CommandFailed, ExecutableNotFound
//!   Config   ParseError, InvalidValue
//!   Fs       NotFound, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`InitError`].
pub type InitResult<T> = std::result::Result<T, InitError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum InitError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Manifest could not be located, parsed, or resolved.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// A project could not be synchronized.
    #[error("sync error: {0}")]
    Sync(#[from] Box<SyncError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`InitError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> InitError {
    InitError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for InitError {
                fn from(err: $error) -> Self {
                    InitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ManifestError => Manifest,
    NetworkError => Network,
    SyncError => Sync,
    GitError => Git,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Manifest Errors ---

/// Manifest resolution errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The repository host has no known raw-content endpoint.
    #[error("unsupported manifest host '{host}' (only github.com is supported)")]
    UnsupportedHost { host: String },

    /// The repository URL could not be understood.
    #[error("invalid repository url '{url}': {message}")]
    InvalidRepoUrl { url: String, message: String },

    /// The manifest is not well-formed XML.
    #[error("failed to parse manifest '{file}': {message}")]
    Parse { file: String, message: String },

    /// The document has no `<manifest>` root element.
    #[error("manifest '{file}' has no <manifest> root element")]
    MissingRoot { file: String },

    /// The manifest does not declare any `<remote>`.
    #[error("manifest '{file}' does not define a <remote>")]
    MissingRemote { file: String },

    /// A required attribute is absent from an element.
    #[error("manifest '{file}': <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        file: String,
        element: String,
        attribute: String,
    },

    /// An include chain leads back to a manifest that is still being resolved.
    #[error("include cycle detected: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Sync Errors ---

/// Submodule synchronization errors that are not git failures.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A project names a remote that no manifest defines.
    #[error("no url found for remote '{remote}' (project '{project}')")]
    UnknownRemote { remote: String, project: String },
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open a repository at a path.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// The git executable is not on `PATH`.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Submodule add failed.
    #[error("failed to add submodule {name} from {url}: {message}")]
    SubmoduleAddFailed {
        name: String,
        url: String,
        message: String,
    },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
