// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and config layering.

use clap::Parser;
use init_repo::cli::Cli;
use init_repo::config::loader::ConfigSource;
use std::fs;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_short_flags() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-b",
        "release",
        "-f",
        "boards.xml",
        "-C",
        "work",
    ])
    .unwrap();

    assert_eq!(cli.url, "https://github.com/acme/manifest");
    assert_eq!(cli.branch.as_deref(), Some("release"));
    assert_eq!(cli.file.as_deref(), Some("boards.xml"));
    assert_eq!(cli.directory.as_deref(), Some(std::path::Path::new("work")));
}

#[test]
fn cli_help_lists_flags() {
    let err = Cli::try_parse_from(["init-repo", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let help = err.to_string();
    for flag in ["--url", "--branch", "--file", "--directory", "--dry", "--config"] {
        assert!(help.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn cli_version_flag() {
    let err = Cli::try_parse_from(["init-repo", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn cli_unknown_flag_rejected() {
    let result = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "--frobnicate",
    ]);
    assert!(result.is_err());
}

// =============================================================================
// Config layering
// =============================================================================

#[test]
fn cli_defaults_without_config_files() {
    let cli = Cli::try_parse_from(["init-repo", "-u", "https://github.com/acme/manifest"]).unwrap();
    let config = cli.config_loader().unwrap().build().unwrap();

    assert_eq!(config.manifest.branch, "main");
    assert_eq!(config.manifest.file, "default.xml");
    assert_eq!(config.manifest.raw_host, "https://raw.githubusercontent.com");
    assert!(!config.global.dry);
}

#[test]
fn cli_config_file_then_flags() {
    let temp = temp_dir();
    let file = temp.path().join("team.toml");
    fs::write(
        &file,
        "[manifest]\nbranch = \"stable\"\nfile = \"team.xml\"\n\n[global]\ndry = true\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-c",
        file.to_str().unwrap(),
        "-f",
        "override.xml",
    ])
    .unwrap();
    let config = cli.config_loader().unwrap().build().unwrap();

    assert_eq!(config.manifest.branch, "stable");
    assert_eq!(config.manifest.file, "override.xml");
    assert!(config.global.dry);
}

#[test]
fn cli_reads_default_config_from_directory() {
    let temp = temp_dir();
    fs::write(
        temp.path().join("init-repo.toml"),
        "[manifest]\nbranch = \"from-root\"\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-C",
        temp.path().to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(cli.default_config_file(), temp.path().join("init-repo.toml"));

    let loader = cli.config_loader().unwrap();
    assert_eq!(
        loader.sources(),
        [ConfigSource::Optional(temp.path().join("init-repo.toml"))]
    );
    assert_eq!(loader.build().unwrap().manifest.branch, "from-root");
}

#[test]
fn cli_later_config_file_wins() {
    let temp = temp_dir();
    let first = temp.path().join("first.toml");
    let second = temp.path().join("second.toml");
    fs::write(&first, "[manifest]\nbranch = \"one\"\n").unwrap();
    fs::write(&second, "[manifest]\nbranch = \"two\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-c",
        first.to_str().unwrap(),
        "-c",
        second.to_str().unwrap(),
    ])
    .unwrap();
    let loader = cli.config_loader().unwrap();
    assert_eq!(loader.sources().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.manifest.branch, "two");
}

#[test]
fn cli_missing_config_file_fails() {
    let temp = temp_dir();
    let missing = temp.path().join("absent.toml");
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();

    assert!(cli.config_loader().unwrap().build().is_err());
}

#[test]
fn cli_set_option_overrides_file() {
    let temp = temp_dir();
    let file = temp.path().join("init-repo.toml");
    fs::write(&file, "[manifest]\nraw_host = \"https://mirror.example.com\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-c",
        file.to_str().unwrap(),
        "-s",
        "manifest.raw_host=http://localhost:9000",
    ])
    .unwrap();
    let config = cli.config_loader().unwrap().build().unwrap();

    assert_eq!(config.manifest.raw_host, "http://localhost:9000");
}

#[test]
fn cli_invalid_raw_host_rejected() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-s",
        "manifest.raw_host=ftp://mirror",
    ])
    .unwrap();

    assert!(cli.config_loader().unwrap().build().is_err());
}
