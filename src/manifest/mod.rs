// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manifest resolution.
//!
//! ```text
//! url::manifest_url(raw_host, repo_url, revision, file)
//!        |
//!        v
//! source::RawContentSource  --fetch(file)-->  XML text
//!        |
//!        v
//! parser::ManifestFile::parse   <remote>/<default>/<project>/<include>
//!        |
//!        v
//! resolver::resolve   depth-first include stack, cycle check
//!        |
//!        v
//! ManifestDocument { remotes, projects }
//! ```
//!
//! # Example Manifest
//!
//! ```xml
//! <manifest>
//!   <remote name="origin" fetch="https://github.com/org" />
//!   <default remote="origin" revision="main" />
//!
//!   <project name="hal" path="lib/hal" revision="v1.4.0">
//!     <copyfile src="tools/Makefile" dest="Makefile" />
//!   </project>
//!
//!   <include name="boards.xml" />
//! </manifest>
//! ```

pub mod parser;
pub mod resolver;
pub mod source;
pub mod url;


use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::SyncError;

/// A file copied out of a submodule into the parent tree after sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFile {
    /// Path relative to the submodule root.
    pub src: String,
    /// Path relative to the parent repository root.
    pub dest: String,
}

/// A project to materialize as a submodule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    /// Repository name, appended to the remote's fetch prefix.
    pub name: String,
    /// Key into [`ManifestDocument::remotes`].
    pub remote: String,
    /// Branch, tag, or commit to check out.
    pub revision: String,
    /// Destination path relative to the parent repository root.
    pub path: String,
    /// Files to copy out of the submodule.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub copyfiles: Vec<CopyFile>,
}

/// A nested manifest referenced by `<include name="..."/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRef {
    pub name: String,
}

/// The flattened result of resolving a manifest and all of its includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestDocument {
    /// Remote name to fetch-URL prefix. Later definitions override earlier ones.
    pub remotes: BTreeMap<String, String>,
    /// Projects in resolution order; duplicates are preserved.
    pub projects: Vec<ProjectRef>,
}

impl ManifestDocument {
    /// Fetch-URL prefix of a remote.
    #[must_use]
    pub fn fetch_prefix(&self, remote: &str) -> Option<&str> {
        self.remotes.get(remote).map(String::as_str)
    }

    /// Clone URL of a project: its remote's fetch prefix joined with its name.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::UnknownRemote` if the project's remote is not defined.
    pub fn project_url(&self, project: &ProjectRef) -> Result<String, SyncError> {
        let prefix =
            self.fetch_prefix(&project.remote)
                .ok_or_else(|| SyncError::UnknownRemote {
                    remote: project.remote.clone(),
                    project: project.name.clone(),
                })?;
        Ok(format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            project.name.trim_start_matches('/')
        ))
    }
}
