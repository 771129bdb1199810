// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)        --> GixBackend (pure Rust gix), ShellBackend
//! SubmoduleQuery (read)  --> ShellBackend (.gitmodules via git config)
//! GitMutation (write)    --> ShellBackend (git CLI)
//!
//! SystemGit = GixBackend queries + ShellBackend submodules/mutations
//! ```

use crate::error::{GitError, GixError, InitResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use tracing::trace;

/// A submodule registered in the parent's `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleInfo {
    /// `submodule.<name>` key.
    pub name: String,
    /// Path relative to the parent work tree.
    pub path: String,
}

/// Everything needed to register a new submodule.
#[derive(Debug, Clone, Copy)]
pub struct SubmoduleSpec<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub url: &'a str,
    pub revision: &'a str,
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if `path` is the root of a git work tree.
    fn is_git_repo(&self, path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or head resolution fails.
    fn current_branch(&self, path: &Path) -> InitResult<Option<String>>;

    /// Get the commit HEAD points at (None on an unborn branch).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or head resolution fails.
    fn head_commit(&self, path: &Path) -> InitResult<Option<String>>;

    /// Resolve a branch, tag, or commit to a full commit id (None if unknown).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened.
    fn resolve_commit(&self, path: &Path, revision: &str) -> InitResult<Option<String>>;
}

/// Read-only view of a repository's submodule registry.
pub trait SubmoduleQuery {
    /// List submodules declared in `repo/.gitmodules`, in file order.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `.gitmodules` exists but cannot be read.
    fn submodules(&self, repo: &Path) -> InitResult<Vec<SubmoduleInfo>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(&self, path: &Path) -> InitResult<()>;

    /// Clone `spec.url` as submodule `spec.name` at `spec.path` and check out
    /// `spec.revision`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone or checkout fails.
    fn add_submodule(&self, repo: &Path, spec: &SubmoduleSpec<'_>) -> InitResult<()>;

    /// Update a submodule: init if missing, recurse into nested submodules,
    /// discard local modifications, and fetch its origin.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the update fails.
    fn update_submodule(&self, repo: &Path, path: &str) -> InitResult<()>;

    /// Checkout a branch, tag, or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout(&self, repo_path: &Path, what: &str) -> InitResult<()>;
}

/// Everything the submodule synchronizer needs from git.
pub trait GitBackend: GitQuery + SubmoduleQuery + GitMutation {}

impl<T: GitQuery + SubmoduleQuery + GitMutation> GitBackend for T {}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> InitResult<gix::Repository> {
        if !path.exists() {
            return Err(GitError::RepoNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let repo = gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?;
        Ok(repo)
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(&self, path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(&self, path: &Path) -> InitResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_commit(&self, path: &Path) -> InitResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.id().map(|id| id.detach().to_string()))
    }

    fn resolve_commit(&self, path: &Path, revision: &str) -> InitResult<Option<String>> {
        let repo = Self::open(path)?;
        let spec = format!("{revision}^{{commit}}");
        Ok(repo
            .rev_parse_single(spec.as_str())
            .ok()
            .map(|id| id.detach().to_string()))
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for:
/// - Submodule clone/update (recursive)
/// - Credential helpers and ssh transports
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

/// Locate the git executable once per process.
fn git_executable() -> InitResult<&'static Path> {
    static GIT: OnceLock<Option<PathBuf>> = OnceLock::new();
    GIT.get_or_init(|| which::which("git").ok())
        .as_deref()
        .ok_or_else(|| {
            GitError::ExecutableNotFound {
                name: "git".to_string(),
            }
            .into()
        })
}

impl ShellBackend {
    fn command(args: &[&str], cwd: &Path) -> InitResult<std::process::Output> {
        trace!(cwd = %cwd.display(), "git {}", args.join(" "));
        let output = Command::new(git_executable()?)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;
        Ok(output)
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> InitResult<String> {
        let output = Self::command(args, cwd)?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(&self, path: &Path) -> bool {
        // An empty prefix means `path` is the top of the work tree.
        path.is_dir()
            && Self::git_command(&["rev-parse", "--show-prefix"], path)
                .is_ok_and(|prefix| prefix.is_empty())
    }

    fn current_branch(&self, path: &Path) -> InitResult<Option<String>> {
        Ok(Self::git_command(&["symbolic-ref", "--short", "-q", "HEAD"], path).ok())
    }

    fn head_commit(&self, path: &Path) -> InitResult<Option<String>> {
        Ok(Self::git_command(&["rev-parse", "--verify", "-q", "HEAD"], path).ok())
    }

    fn resolve_commit(&self, path: &Path, revision: &str) -> InitResult<Option<String>> {
        let spec = format!("{revision}^{{commit}}");
        Ok(Self::git_command(&["rev-parse", "--verify", "-q", &spec], path).ok())
    }
}

impl SubmoduleQuery for ShellBackend {
    fn submodules(&self, repo: &Path) -> InitResult<Vec<SubmoduleInfo>> {
        if !repo.join(".gitmodules").is_file() {
            return Ok(Vec::new());
        }

        let args = [
            "config",
            "--file",
            ".gitmodules",
            "--get-regexp",
            r"^submodule\..*\.path$",
        ];
        let output = Self::command(&args, repo)?;
        // Exit code 1: no matching keys
        if output.status.code() == Some(1) {
            return Ok(Vec::new());
        }
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(parse_gitmodules_paths(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `submodule.<name>.path <path>` lines.
fn parse_gitmodules_paths(output: &str) -> Vec<SubmoduleInfo> {
    output
        .lines()
        .filter_map(|line| {
            let (key, path) = line.split_once(' ')?;
            let name = key.strip_prefix("submodule.")?.strip_suffix(".path")?;
            Some(SubmoduleInfo {
                name: name.to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}

impl GitMutation for ShellBackend {
    fn init_repo(&self, path: &Path) -> InitResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    fn add_submodule(&self, repo: &Path, spec: &SubmoduleSpec<'_>) -> InitResult<()> {
        // `-b` only accepts branches, so the revision is checked out afterwards.
        Self::git_command(
            &[
                "submodule",
                "add",
                "--quiet",
                "--name",
                spec.name,
                spec.url,
                spec.path,
            ],
            repo,
        )
        .map_err(|e| GitError::SubmoduleAddFailed {
            name: spec.name.to_string(),
            url: spec.url.to_string(),
            message: e.to_string(),
        })?;

        self.checkout(&repo.join(spec.path), spec.revision)?;
        Self::git_command(&["add", "--", spec.path], repo)?;
        Ok(())
    }

    fn update_submodule(&self, repo: &Path, path: &str) -> InitResult<()> {
        Self::git_command(
            &[
                "submodule",
                "update",
                "--init",
                "--recursive",
                "--force",
                "--quiet",
                "--",
                path,
            ],
            repo,
        )?;
        Self::git_command(&["fetch", "--quiet", "--tags", "origin"], &repo.join(path))?;
        Ok(())
    }

    fn checkout(&self, repo_path: &Path, what: &str) -> InitResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo_path,
        )
        .map_err(|e| GitError::CheckoutFailed {
            what: what.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

// --- SystemGit (gix reads, git CLI writes) ---

/// Production backend: gix for queries, git CLI for submodules and writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit {
    query: GixBackend,
    shell: ShellBackend,
}

impl GitQuery for SystemGit {
    fn is_git_repo(&self, path: &Path) -> bool {
        self.query.is_git_repo(path)
    }

    fn current_branch(&self, path: &Path) -> InitResult<Option<String>> {
        self.query.current_branch(path)
    }

    fn head_commit(&self, path: &Path) -> InitResult<Option<String>> {
        self.query.head_commit(path)
    }

    fn resolve_commit(&self, path: &Path, revision: &str) -> InitResult<Option<String>> {
        self.query.resolve_commit(path, revision)
    }
}

impl SubmoduleQuery for SystemGit {
    fn submodules(&self, repo: &Path) -> InitResult<Vec<SubmoduleInfo>> {
        self.shell.submodules(repo)
    }
}

impl GitMutation for SystemGit {
    fn init_repo(&self, path: &Path) -> InitResult<()> {
        self.shell.init_repo(path)
    }

    fn add_submodule(&self, repo: &Path, spec: &SubmoduleSpec<'_>) -> InitResult<()> {
        self.shell.add_submodule(repo, spec)
    }

    fn update_submodule(&self, repo: &Path, path: &str) -> InitResult<()> {
        self.shell.update_submodule(repo, path)
    }

    fn checkout(&self, repo_path: &Path, what: &str) -> InitResult<()> {
        self.shell.checkout(repo_path, what)
    }
}

#[cfg(test)]
mod tests;
