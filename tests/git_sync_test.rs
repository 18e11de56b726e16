//! End-to-end sync against a real git repository
//!
//! Builds a throwaway TIL repo, commits notes, and checks that the post-commit
//! (diff) sync follows exactly what the last commit touched.
//! Skipped when the `git` executable is not available.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use til_lib::{sync_diff, sync_full, CommitChanges, GitCli, SyncConfig};

fn git_available() -> bool {
    Command::new("git").arg("--version").output().map_or(false, |o| o.status.success())
}

fn git(repo: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(["-c", "user.name=TIL Test", "-c", "user.email=til@example.com", "-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(repo)
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Repo with two commits: the second edits one note, adds one, deletes one
fn build_repo(root: &Path) {
    git(root, &["init", "-q"]);
    write(&root.join("README.md"), "# TIL\n");
    write(&root.join("rust/ownership.md"), "# Ownership\n");
    write(&root.join("rust/obsolete.md"), "# Obsolete\n");
    write(&root.join("go/defer.md"), "# Defer\n");
    git(root, &["add", "-A"]);
    git(root, &["commit", "-q", "-m", "initial notes"]);

    write(&root.join("rust/ownership.md"), "# Ownership\n\nSee [Lifetimes](./lifetimes.md).\n");
    write(&root.join("rust/lifetimes.md"), "# Lifetimes\n");
    write(&root.join("README.md"), "# TIL\n\nupdated\n");
    write(&root.join("scripts/notes.txt"), "not markdown\n");
    fs::remove_file(root.join("rust/obsolete.md")).unwrap();
    git(root, &["add", "-A"]);
    git(root, &["commit", "-q", "-m", "edit, add, delete"]);
}

#[test]
fn test_git_cli_reports_last_commit() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("til");
    fs::create_dir_all(&root).unwrap();
    build_repo(&root);

    let git = GitCli::new(&root);

    let mut changed: Vec<String> = git
        .changed_md_files()
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    changed.sort();
    assert_eq!(changed, vec!["README.md", "rust/lifetimes.md", "rust/ownership.md"]);

    assert_eq!(git.deleted_md_stems().unwrap(), vec!["obsolete"]);
}

#[test]
fn test_diff_sync_after_commit() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("til");
    fs::create_dir_all(&root).unwrap();
    build_repo(&root);

    let vault = temp_dir.path().join("vault");
    write(&vault.join("obsolete.md"), "synced earlier");
    write(&vault.join("defer.md"), "synced earlier");

    let config = SyncConfig::new(&root, &vault);
    let report = sync_diff(&config, &GitCli::new(&root)).unwrap();

    let mut synced = report.synced_files();
    synced.sort();
    assert_eq!(synced, vec!["lifetimes.md", "ownership.md"]);
    assert_eq!(report.deleted_count(), 1);

    assert!(!vault.join("obsolete.md").exists());
    assert!(!vault.join("README.md").exists());
    assert_eq!(fs::read_to_string(vault.join("defer.md")).unwrap(), "synced earlier");

    let ownership = fs::read_to_string(vault.join("ownership.md")).unwrap();
    assert!(ownership.contains("related_notes:\n  - \"[[lifetimes]]\"\n"));
    assert!(ownership.contains("See [[lifetimes|Lifetimes]]."));
}

#[test]
fn test_full_sync_matches_tree_after_commit() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("til");
    fs::create_dir_all(&root).unwrap();
    build_repo(&root);

    let vault = temp_dir.path().join("vault");
    write(&vault.join("obsolete.md"), "synced earlier");

    let report = sync_full(&SyncConfig::new(&root, &vault)).unwrap();

    let mut synced = report.synced_files();
    synced.sort();
    assert_eq!(synced, vec!["defer.md", "lifetimes.md", "ownership.md"]);
    assert!(!vault.join("obsolete.md").exists());
    assert!(!vault.join("README.md").exists());
}

#[test]
fn test_hangul_note_names_follow_last_commit() {
    if !git_available() {
        println!("git not available, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("til");
    fs::create_dir_all(&root).unwrap();

    git(&root, &["init", "-q"]);
    write(&root.join("rust/소유권.md"), "# 소유권\n");
    write(&root.join("rust/빌림.md"), "# 빌림\n");
    git(&root, &["add", "-A"]);
    git(&root, &["commit", "-q", "-m", "initial notes"]);

    write(&root.join("rust/소유권.md"), "# 소유권\n\n[빌림 정리](./새노트.md)\n");
    write(&root.join("rust/새노트.md"), "# 새 노트\n");
    fs::remove_file(root.join("rust/빌림.md")).unwrap();
    git(&root, &["add", "-A"]);
    git(&root, &["commit", "-q", "-m", "hangul edits"]);

    let git_cli = GitCli::new(&root);
    let mut changed: Vec<String> = git_cli
        .changed_md_files()
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    changed.sort();
    let mut expected = vec!["rust/새노트.md".to_string(), "rust/소유권.md".to_string()];
    expected.sort();
    assert_eq!(changed, expected);
    assert_eq!(git_cli.deleted_md_stems().unwrap(), vec!["빌림"]);

    let vault = temp_dir.path().join("vault");
    write(&vault.join("빌림.md"), "synced earlier");
    let report = sync_diff(&SyncConfig::new(&root, &vault), &git_cli).unwrap();

    assert_eq!(report.synced_count(), 2);
    assert_eq!(report.deleted_count(), 1);
    assert!(!vault.join("빌림.md").exists());
    let note = fs::read_to_string(vault.join("소유권.md")).unwrap();
    assert!(note.contains("[[새노트|빌림 정리]]"));
}
