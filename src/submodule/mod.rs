// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule synchronization.
//!
//! ```text
//! for project in manifest.projects (in order):
//!   url = remotes[project.remote] + "/" + name     missing -> UnknownRemote
//!   .gitmodules has name?
//!     no  -> add_submodule + checkout revision          Added
//!     yes -> at revision?  (branch == rev || HEAD == rev^{commit})
//!              no  -> update_submodule + checkout       Updated { from }
//!              yes -> nothing                           Unchanged
//!   copyfiles: <root>/<path>/<src> -> <root>/<dest>
//! ```
//!
//! A second run over an unchanged manifest performs no mutating git call.

use anyhow::Context;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{InitError, Result};
use crate::git::{GitBackend, SubmoduleInfo, SubmoduleSpec};
use crate::manifest::{ManifestDocument, ProjectRef};
use crate::utility::fs::copy_file_async;

/// What the synchronizer did (or would do, in dry run) for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SyncAction {
    /// A new submodule was registered.
    Added,
    /// An existing submodule was moved to the manifest revision.
    Updated {
        /// Branch or commit checked out before, if any.
        from: Option<String>,
    },
    /// Already at the manifest revision.
    Unchanged,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Updated { from: Some(from) } => write!(f, "updated from {from}"),
            Self::Updated { from: None } => f.write_str("updated"),
            Self::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// Per-project result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOutcome {
    pub name: String,
    pub path: String,
    pub revision: String,
    #[serde(flatten)]
    pub action: SyncAction,
}

/// Result of a synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// One entry per manifest project, in manifest order.
    pub projects: Vec<ProjectOutcome>,
    /// Number of files copied by `<copyfile>` entries.
    pub copied: usize,
    /// Whether mutations were skipped.
    pub dry: bool,
}

impl SyncReport {
    fn count(&self, pred: impl Fn(&SyncAction) -> bool) -> usize {
        self.projects.iter().filter(|p| pred(&p.action)).count()
    }

    #[must_use]
    pub fn added(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Added))
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Updated { .. }))
    }

    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Unchanged))
    }

    /// One-line summary for logging.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}{} projects: {} added, {} updated, {} unchanged, {} files copied",
            if self.dry { "[dry run] " } else { "" },
            self.projects.len(),
            self.added(),
            self.updated(),
            self.unchanged(),
            self.copied
        )
    }
}

/// Whether a submodule's checkout matches a revision.
#[derive(Debug, PartialEq, Eq)]
enum RefState {
    AtRevision,
    Differs { from: Option<String> },
}

/// Brings a repository's submodules in line with a resolved manifest.
pub struct Synchronizer<'a, G: GitBackend> {
    git: &'a G,
    root: PathBuf,
    dry: bool,
}

impl<'a, G: GitBackend> Synchronizer<'a, G> {
    /// Synchronizer for the repository rooted at `root`.
    pub fn new(git: &'a G, root: impl Into<PathBuf>) -> Self {
        Self {
            git,
            root: root.into(),
            dry: false,
        }
    }

    /// Plan only: log actions without mutating the repository.
    #[must_use]
    pub const fn dry_run(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Process every project of `manifest` in order.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::UnknownRemote` for a project whose remote is not
    /// defined, and git or filesystem errors as they occur. Projects before the
    /// failing one keep their changes.
    pub async fn run(&self, manifest: &ManifestDocument) -> Result<SyncReport> {
        let mut registered = self.git.submodules(&self.root)?;
        debug!(
            root = %self.root.display(),
            count = registered.len(),
            "registered submodules"
        );

        let mut report = SyncReport {
            dry: self.dry,
            ..SyncReport::default()
        };

        for project in &manifest.projects {
            let url = manifest.project_url(project).map_err(InitError::from)?;
            let existing = registered.iter().find(|s| s.name == project.name).cloned();

            let (action, path) = match existing {
                None => {
                    self.add(project, &url)?;
                    registered.push(SubmoduleInfo {
                        name: project.name.clone(),
                        path: project.path.clone(),
                    });
                    (SyncAction::Added, project.path.clone())
                }
                Some(submodule) => {
                    if submodule.path != project.path {
                        warn!(
                            name = %project.name,
                            registered = %submodule.path,
                            manifest = %project.path,
                            "submodule registered under a different path, using registered path"
                        );
                    }
                    (self.update(project, &submodule.path)?, submodule.path)
                }
            };

            report.copied += self.copy_files(project, &path).await?;
            report.projects.push(ProjectOutcome {
                name: project.name.clone(),
                path,
                revision: project.revision.clone(),
                action,
            });
        }

        Ok(report)
    }

    fn add(&self, project: &ProjectRef, url: &str) -> Result<()> {
        info!(
            name = %project.name,
            path = %project.path,
            revision = %project.revision,
            "adding submodule from {url}"
        );
        if self.dry {
            return Ok(());
        }

        let spec = SubmoduleSpec {
            name: &project.name,
            path: &project.path,
            url,
            revision: &project.revision,
        };
        self.git
            .add_submodule(&self.root, &spec)
            .with_context(|| format!("failed to add submodule '{}'", project.name))?;
        Ok(())
    }

    fn update(&self, project: &ProjectRef, path: &str) -> Result<SyncAction> {
        let submodule_path = self.root.join(path);
        let from = match self.ref_state(&submodule_path, &project.revision)? {
            RefState::AtRevision => {
                debug!(name = %project.name, revision = %project.revision, "submodule up to date");
                return Ok(SyncAction::Unchanged);
            }
            RefState::Differs { from } => from,
        };

        info!(
            name = %project.name,
            path,
            from = from.as_deref().unwrap_or("<none>"),
            "updating submodule to {}",
            project.revision
        );
        if !self.dry {
            self.git
                .update_submodule(&self.root, path)
                .with_context(|| format!("failed to update submodule '{}'", project.name))?;
            self.git.checkout(&submodule_path, &project.revision)?;
        }
        Ok(SyncAction::Updated { from })
    }

    fn ref_state(&self, submodule_path: &Path, revision: &str) -> Result<RefState> {
        if !self.git.is_git_repo(submodule_path) {
            return Ok(RefState::Differs { from: None });
        }

        let branch = self.git.current_branch(submodule_path)?;
        if branch.as_deref() == Some(revision) {
            return Ok(RefState::AtRevision);
        }

        let head = self.git.head_commit(submodule_path)?;
        if head.is_some() && head == self.git.resolve_commit(submodule_path, revision)? {
            return Ok(RefState::AtRevision);
        }

        Ok(RefState::Differs {
            from: branch.or_else(|| head.map(|h| h.chars().take(12).collect())),
        })
    }

    async fn copy_files(&self, project: &ProjectRef, path: &str) -> Result<usize> {
        let mut copied = 0;
        for copyfile in &project.copyfiles {
            let src = self.root.join(path).join(&copyfile.src);
            let dest = self.root.join(&copyfile.dest);
            if self.dry {
                debug!("would copy {} -> {}", src.display(), dest.display());
                continue;
            }
            copied += copy_file_async(&src, &dest).await.with_context(|| {
                format!("copyfile for project '{}' failed", project.name)
            })?;
            debug!("copied {} -> {}", src.display(), dest.display());
        }
        Ok(copied)
    }
}
