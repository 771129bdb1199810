// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Include resolution.
//!
//! ```text
//! stack: [default.xml, boards.xml, vendor.xml]   (depth-first)
//!          |            |           |
//!          Resolved     Resolved    Resolved
//!
//! next include of top frame?
//!   yes -> on stack already (`./a.xml` == `/a.xml` == `a.xml`)?  IncludeCycle(chain)
//!          else fetch + parse, push frame
//!   no  -> pop frame, parent = parent.merge(child)
//! ```
//!
//! Merge rules: included remotes override the includer's on name collision;
//! included projects are appended after the includer's own projects.
//! A file included from two places (diamond) is resolved both times.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::parser::ManifestFile;
use super::source::ManifestSource;
use super::url::normalize_file;
use super::{IncludeRef, ManifestDocument, ProjectRef};
use crate::error::{InitResult, ManifestError, bail_out};

/// Remotes and projects contributed by one manifest and everything it includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub remotes: BTreeMap<String, String>,
    pub projects: Vec<ProjectRef>,
}

impl Resolved {
    /// Contribution of a single file, before its includes.
    #[must_use]
    pub fn from_file(file: &ManifestFile) -> Self {
        Self {
            remotes: file
                .remotes
                .iter()
                .map(|r| (r.name.clone(), r.fetch.clone()))
                .collect(),
            projects: file.projects.clone(),
        }
    }

    /// Combine with the result of an included manifest.
    #[must_use]
    pub fn merge(mut self, included: Self) -> Self {
        self.remotes.extend(included.remotes);
        self.projects.extend(included.projects);
        self
    }
}

impl From<Resolved> for ManifestDocument {
    fn from(resolved: Resolved) -> Self {
        Self {
            remotes: resolved.remotes,
            projects: resolved.projects,
        }
    }
}

struct Frame {
    file: String,
    includes: std::vec::IntoIter<IncludeRef>,
    resolved: Resolved,
}

async fn open_frame<S: ManifestSource>(source: &S, file: &str) -> InitResult<Frame> {
    debug!(url = %source.describe(file), "fetching manifest");
    let xml = source.fetch(file).await?;
    let parsed = ManifestFile::parse(file, &xml)?;
    debug!(
        file,
        remotes = parsed.remotes.len(),
        projects = parsed.projects.len(),
        includes = parsed.includes.len(),
        "parsed manifest"
    );
    let resolved = Resolved::from_file(&parsed);
    Ok(Frame {
        file: file.to_string(),
        includes: parsed.includes.into_iter(),
        resolved,
    })
}

/// Fetch `root` from `source` and inline all of its includes.
///
/// # Errors
///
/// Returns an error if any manifest cannot be fetched or parsed, or if an
/// include chain leads back to a manifest that is still being resolved.
pub async fn resolve<S: ManifestSource>(source: &S, root: &str) -> InitResult<ManifestDocument> {
    let mut stack = vec![open_frame(source, root).await?];
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(include) = frame.includes.next() {
            let target = normalize_file(&include.name);
            if let Some(start) = stack.iter().position(|f| normalize_file(&f.file) == target) {
                let mut chain: Vec<String> = stack[start..].iter().map(|f| f.file.clone()).collect();
                chain.push(include.name);
                return Err(ManifestError::IncludeCycle { chain }.into());
            }
            stack.push(open_frame(source, &include.name).await?);
            continue;
        }

        let Some(done) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => {
                parent.resolved = std::mem::take(&mut parent.resolved).merge(done.resolved);
            }
            None => finished = Some(done.resolved),
        }
    }

    let document: ManifestDocument = finished
        .ok_or_else(|| bail_out("manifest resolution ended without a result"))?
        .into();
    info!(
        manifest = root,
        remotes = document.remotes.len(),
        projects = document.projects.len(),
        "resolved manifest"
    );
    Ok(document)
}
