// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    GitMutation, GitQuery, GixBackend, ShellBackend, SubmoduleInfo, SubmoduleQuery, SystemGit,
    parse_gitmodules_paths,
};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(args: &[&str], cwd: &Path) -> String {
    ShellBackend::git_command(args, cwd).expect("git command failed")
}

fn commit(cwd: &Path, message: &str) {
    git(
        &[
            "-c",
            "user.name=init-repo",
            "-c",
            "user.email=init-repo@example.invalid",
            "commit",
            "--quiet",
            "--allow-empty",
            "-m",
            message,
        ],
        cwd,
    );
}

fn committed_repo() -> TempDir {
    let temp = temp_dir();
    ShellBackend.init_repo(temp.path()).expect("failed to init repo");
    commit(temp.path(), "initial");
    temp
}

#[test]
fn test_gix_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!GixBackend.is_git_repo(temp.path()));

    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend.is_git_repo(temp.path()));
}

#[test]
fn test_shell_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!ShellBackend.is_git_repo(temp.path()));

    ShellBackend.init_repo(temp.path()).expect("failed to init repo");
    assert!(ShellBackend.is_git_repo(temp.path()));
}

#[test]
fn test_subdirectory_is_not_a_repo_root() {
    let temp = temp_dir();
    ShellBackend.init_repo(temp.path()).expect("failed to init repo");
    let sub = temp.path().join("lib").join("hal");
    std::fs::create_dir_all(&sub).expect("failed to create dir");

    assert!(!GixBackend.is_git_repo(&sub));
    assert!(!ShellBackend.is_git_repo(&sub));
}

#[test]
fn test_missing_path_is_not_a_repo() {
    let temp = temp_dir();
    let missing = temp.path().join("nope");
    assert!(!GixBackend.is_git_repo(&missing));
    assert!(!ShellBackend.is_git_repo(&missing));
}

#[test]
fn test_unborn_head_has_no_commit() {
    let temp = temp_dir();
    ShellBackend.init_repo(temp.path()).expect("failed to init repo");

    assert_eq!(GixBackend.head_commit(temp.path()).unwrap(), None);
    assert_eq!(ShellBackend.head_commit(temp.path()).unwrap(), None);
}

#[test]
fn test_backends_agree_on_branch_and_head() {
    let temp = committed_repo();

    let gix_branch = GixBackend.current_branch(temp.path()).unwrap();
    let shell_branch = ShellBackend.current_branch(temp.path()).unwrap();
    assert!(gix_branch.is_some());
    assert_eq!(gix_branch, shell_branch);

    let gix_head = GixBackend.head_commit(temp.path()).unwrap();
    let shell_head = ShellBackend.head_commit(temp.path()).unwrap();
    assert!(gix_head.is_some());
    assert_eq!(gix_head, shell_head);
}

#[test]
fn test_resolve_commit_tag_and_unknown() {
    let temp = committed_repo();
    git(&["tag", "v1.0.0"], temp.path());
    let head = GixBackend.head_commit(temp.path()).unwrap();

    assert_eq!(GixBackend.resolve_commit(temp.path(), "v1.0.0").unwrap(), head);
    assert_eq!(ShellBackend.resolve_commit(temp.path(), "v1.0.0").unwrap(), head);
    assert_eq!(GixBackend.resolve_commit(temp.path(), "no-such-ref").unwrap(), None);
    assert_eq!(ShellBackend.resolve_commit(temp.path(), "no-such-ref").unwrap(), None);
}

#[test]
fn test_checkout_tag_detaches_head() {
    let temp = committed_repo();
    git(&["tag", "v1.0.0"], temp.path());
    commit(temp.path(), "second");

    SystemGit::default().checkout(temp.path(), "v1.0.0").unwrap();

    assert_eq!(SystemGit::default().current_branch(temp.path()).unwrap(), None);
    assert_eq!(
        SystemGit::default().head_commit(temp.path()).unwrap(),
        SystemGit::default().resolve_commit(temp.path(), "v1.0.0").unwrap()
    );
}

#[test]
fn test_checkout_unknown_revision_fails() {
    let temp = committed_repo();
    let err = SystemGit::default().checkout(temp.path(), "no-such-ref").unwrap_err();
    assert!(err.to_string().contains("no-such-ref"));
}

#[test]
fn test_submodules_without_gitmodules() {
    let temp = committed_repo();
    assert!(ShellBackend.submodules(temp.path()).unwrap().is_empty());
}

#[test]
fn test_submodules_reads_gitmodules() {
    let temp = committed_repo();
    std::fs::write(
        temp.path().join(".gitmodules"),
        "[submodule \"platform/hal\"]\n\tpath = lib/hal\n\turl = https://github.com/acme/hal\n\
         [submodule \"tools\"]\n\tpath = tools\n\turl = https://github.com/acme/tools\n",
    )
    .unwrap();

    let submodules = SystemGit::default().submodules(temp.path()).unwrap();
    assert_eq!(
        submodules,
        vec![
            SubmoduleInfo {
                name: "platform/hal".to_string(),
                path: "lib/hal".to_string(),
            },
            SubmoduleInfo {
                name: "tools".to_string(),
                path: "tools".to_string(),
            },
        ]
    );
}

#[test]
fn test_submodules_empty_gitmodules() {
    let temp = committed_repo();
    std::fs::write(temp.path().join(".gitmodules"), "").unwrap();
    assert!(ShellBackend.submodules(temp.path()).unwrap().is_empty());
}

#[test]
fn test_parse_gitmodules_paths_dotted_names() {
    let parsed = parse_gitmodules_paths(
        "submodule.lib.v2.path vendor/lib\nsubmodule.x.url ignored\ngarbage\n",
    );
    assert_eq!(
        parsed,
        vec![SubmoduleInfo {
            name: "lib.v2".to_string(),
            path: "vendor/lib".to_string(),
        }]
    );
}
