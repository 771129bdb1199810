// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with async copy.
//!
//! ```text
//! copy:  copy_file_async()          tokio::fs copy, creates parent dirs
//!        copy_dir_contents_async()  recursive directory copy
//! ```

pub mod copy;

pub use copy::{copy_dir_contents_async, copy_file_async};
