// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use crate::config::types::GlobalConfig;
use std::path::{Path, PathBuf};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(0).unwrap(), LogLevel::SILENT);
    assert_eq!(LogLevel::new(6).unwrap().as_u8(), 6);
    insta::assert_snapshot!(
        LogLevel::new(7).unwrap_err(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
}

#[test]
fn test_filter_string_caps_dependencies_below_dump() {
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
    assert!(
        LogLevel::DEBUG
            .to_filter_string()
            .contains("reqwest=warn")
    );
    assert_eq!(LogLevel::DUMP.to_filter_string(), "trace");
}

#[test]
fn test_log_level_deserializes_from_integer() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::TRACE).unwrap(), "5");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_from_global_without_file() {
    let global = GlobalConfig {
        output_log_level: LogLevel::WARN,
        ..GlobalConfig::default()
    };
    let config = LogConfig::from(&global);
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_from_global_with_file() {
    let global = GlobalConfig {
        file_log_level: LogLevel::DEBUG,
        log_file: PathBuf::from("logs/init-repo.log"),
        ..GlobalConfig::default()
    };
    let config = LogConfig::from(&global);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some(Path::new("logs/init-repo.log")));
}
