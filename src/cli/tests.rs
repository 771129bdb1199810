// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::Cli;
use clap::Parser;
use std::path::PathBuf;

fn pairs(overrides: &[(String, String)]) -> Vec<(&str, &str)> {
    overrides
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[test]
fn test_parse_minimal() {
    let cli = Cli::try_parse_from(["init-repo", "-u", "https://github.com/acme/manifest"]).unwrap();
    assert_eq!(cli.url, "https://github.com/acme/manifest");
    assert_eq!(cli.branch, None);
    assert_eq!(cli.file, None);
    assert_eq!(cli.directory, None);
    assert!(!cli.global.dry);
    assert!(!cli.json);
    assert!(cli.to_config_overrides().unwrap().is_empty());
}

#[test]
fn test_url_is_required() {
    let err = Cli::try_parse_from(["init-repo", "-b", "main"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_parse_long_options() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "--url",
        "git@github.com:acme/manifest.git",
        "--branch",
        "release",
        "--file",
        "boards.xml",
        "--directory",
        "/tmp/work",
    ])
    .unwrap();
    assert_eq!(cli.branch.as_deref(), Some("release"));
    assert_eq!(cli.file.as_deref(), Some("boards.xml"));
    assert_eq!(cli.directory, Some(PathBuf::from("/tmp/work")));

    let overrides = cli.to_config_overrides().unwrap();
    assert_eq!(
        pairs(&overrides),
        vec![
            ("manifest.branch", "release"),
            ("manifest.file", "boards.xml"),
        ]
    );
}

#[test]
fn test_global_options_to_overrides() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-l",
        "4",
        "--dry",
        "--log-file",
        "sync.log",
        "-s",
        "manifest.raw_host=http://localhost:8080",
    ])
    .unwrap();

    let overrides = cli.to_config_overrides().unwrap();
    assert_eq!(
        pairs(&overrides),
        vec![
            ("manifest.raw_host", "http://localhost:8080"),
            ("global.output_log_level", "4"),
            ("global.file_log_level", "4"),
            ("global.log_file", "sync.log"),
            ("global.dry", "true"),
        ]
    );
}

#[test]
fn test_file_log_level_overrides_console_level() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-l",
        "2",
        "--file-log-level",
        "5",
    ])
    .unwrap();

    let overrides = cli.to_config_overrides().unwrap();
    assert!(overrides.contains(&("global.file_log_level".to_string(), "5".to_string())));
}

#[test]
fn test_log_level_out_of_range() {
    let result = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-l",
        "7",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_malformed_set_option() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "--set",
        "manifest.branch",
    ])
    .unwrap();

    let err = cli.to_config_overrides().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"fatal error: invalid --set option 'manifest.branch' (expected KEY=VALUE)"
    );
}

#[test]
fn test_repeated_config_files() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
}

#[test]
fn test_cli_overrides_reach_config() {
    let cli = Cli::try_parse_from([
        "init-repo",
        "-u",
        "https://github.com/acme/manifest",
        "-b",
        "v2.0",
        "-f",
        "boards.xml",
        "--dry",
        "-l",
        "4",
    ])
    .unwrap();

    let config = cli.config_loader().unwrap().build().unwrap();
    assert_eq!(config.manifest.branch, "v2.0");
    assert_eq!(config.manifest.file, "boards.xml");
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
}
