// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Config --> cmd::init::run_init_command
//!   root dir -> git init? -> resolve manifest -> sync submodules
//! ```

pub mod init;
