// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!      ,------------------------------,
//!      |       backend (traits)       |
//!      '--+-----------+------------+--'
//!         |           |            |
//!         v           v            v
//!    GitQuery   SubmoduleQuery  GitMutation
//!   (gix, read)  (CLI, read)    (CLI, write)
//!         |           |            |
//!         v           v            v
//!    GixBackend     ShellBackend ------
//!    .is_repo       .submodules   .init
//!    .branch                      .submodule add/update
//!    .head/.resolve               .checkout
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for credentials, submodules, writes.
//! **`SystemGit`** combines the two and is what the CLI uses.

pub mod backend;

pub use backend::{
    GitBackend, GitMutation, GitQuery, GixBackend, ShellBackend, SubmoduleInfo, SubmoduleQuery,
    SubmoduleSpec, SystemGit,
};
