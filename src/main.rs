// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (toml + env + flags) --> Logging --> run_init_command
//! ```

use std::process::ExitCode;

use init_repo::cli::{self, Cli};
use init_repo::cmd::init::{render_report_json, resolve_root, run_init_command};
use init_repo::config::Config;
use init_repo::git::SystemGit;
use init_repo::logging::{LogConfig, init_logging};
use init_repo::submodule::SyncReport;

use mimalloc::MiMalloc;
use tracing::debug;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, config_files) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    for line in &config_files {
        debug!("config file {line}");
    }

    let result = match resolve_root(cli.directory.as_deref()) {
        Ok(root) => run_init_command(&SystemGit::default(), &cli.url, &root, &config)
            .await
            .and_then(|report| print_report(&report, cli.json)),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> init_repo::error::Result<(Config, Vec<String>)> {
    let loader = cli.config_loader()?;
    let files = loader.format_loaded_files();
    Ok((loader.build()?, files))
}

fn print_report(report: &SyncReport, json: bool) -> init_repo::error::Result<()> {
    if json {
        println!("{}", render_report_json(report)?);
    }
    Ok(())
}
