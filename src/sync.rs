//! Mirror TIL notes into the Obsidian vault.
//!
//! Two policies:
//! - full: clear every `*.md` in the vault and regenerate it from all topic folders
//!   (post-merge hook, first setup)
//! - diff: only the notes added, modified or deleted by the last commit
//!   (post-commit hook)
//!
//! Per-file problems become [`FileOutcome::Failed`] entries in the report and the
//! run continues; only whole-run failures are returned as `Err`.

use crate::config::SyncConfig;
use crate::fsutil::{atomic_write_file, capitalize, file_name_string};
use crate::git::CommitChanges;
use crate::note::process_note;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Full,
    Diff,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// Written to the vault (file = vault file name)
    Synced { file: String },
    /// Removed from the vault
    Deleted { file: String },
    /// Excluded by configuration
    Skipped { file: String, reason: String },
    Failed { file: String, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub outcomes: Vec<FileOutcome>,
}

impl SyncReport {
    pub fn new(mode: SyncMode) -> Self {
        Self {
            mode,
            outcomes: Vec::new(),
        }
    }

    pub fn synced_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Synced { .. }))
            .count()
    }

    pub fn deleted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Deleted { .. }))
            .count()
    }

    pub fn failures(&self) -> Vec<&FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .collect()
    }

    /// Vault file names written during this run
    pub fn synced_files(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FileOutcome::Synced { file } => Some(file.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Failed { file, message } => {
                log::warn!("[sync] {} failed: {}", file, message);
            }
            FileOutcome::Skipped { file, reason } => {
                log::debug!("[sync] {} skipped: {}", file, reason);
            }
            _ => {}
        }
        self.outcomes.push(outcome);
    }
}

fn ensure_vault(vault_path: &Path) -> Result<(), String> {
    fs::create_dir_all(vault_path)
        .map_err(|e| format!("Failed to create vault directory {:?}: {}", vault_path, e))
}

/// Sorted entries of a directory, so runs are reproducible across filesystems
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let read_dir = fs::read_dir(dir).map_err(|e| format!("Failed to read {:?}: {}", dir, e))?;
    let mut paths: Vec<PathBuf> = read_dir.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    Ok(paths)
}

fn is_md_file(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == "md")
}

/// Transform one note and write it to `<vault>/<stem>.md`
fn sync_note(vault_path: &Path, src_path: &Path, category: &str) -> FileOutcome {
    let result = process_note(src_path, category).and_then(|(stem, content)| -> Result<String, String> {
        let file = format!("{}.md", stem);
        atomic_write_file(&vault_path.join(&file), content.as_bytes())?;
        Ok(file)
    });

    match result {
        Ok(file) => FileOutcome::Synced { file },
        Err(message) => FileOutcome::Failed {
            file: file_name_string(src_path),
            message,
        },
    }
}

/// Remove every `*.md` directly inside the vault; failures are recorded, not fatal
fn clear_vault(
    vault_path: &Path,
    report: &mut SyncReport,
    remove_file: &dyn Fn(&Path) -> io::Result<()>,
) -> Result<(), String> {
    for path in sorted_entries(vault_path)? {
        if !is_md_file(&path) {
            continue;
        }
        let file = file_name_string(&path);
        match remove_file(&path) {
            Ok(()) => report.record(FileOutcome::Deleted { file }),
            Err(e) => report.record(FileOutcome::Failed {
                file,
                message: format!("Failed to delete: {}", e),
            }),
        }
    }
    Ok(())
}

/// Clean sync of every topic folder into the vault
pub fn sync_full(config: &SyncConfig) -> Result<SyncReport, String> {
    sync_full_with(config, &|path| fs::remove_file(path))
}

/// Full sync with the vault-clearing delete supplied by the caller
fn sync_full_with(
    config: &SyncConfig,
    remove_file: &dyn Fn(&Path) -> io::Result<()>,
) -> Result<SyncReport, String> {
    ensure_vault(&config.vault_path)?;

    let mut report = SyncReport::new(SyncMode::Full);
    clear_vault(&config.vault_path, &mut report, remove_file)?;
    let cleared = report.deleted_count();

    for topic_dir in sorted_entries(&config.til_root)? {
        if !topic_dir.is_dir() {
            continue;
        }
        let dir_name = file_name_string(&topic_dir);
        if config.is_excluded_dir(&dir_name) {
            continue;
        }

        let category = capitalize(&dir_name);
        let md_files = match sorted_entries(&topic_dir) {
            Ok(entries) => entries.into_iter().filter(|p| is_md_file(p)),
            Err(message) => {
                report.record(FileOutcome::Failed {
                    file: dir_name,
                    message,
                });
                continue;
            }
        };

        for md_file in md_files {
            let file_name = file_name_string(&md_file);
            if config.is_excluded_file(&file_name) {
                report.record(FileOutcome::Skipped {
                    file: file_name,
                    reason: "excluded file".to_string(),
                });
                continue;
            }
            let outcome = sync_note(&config.vault_path, &md_file, &category);
            report.record(outcome);
        }
    }

    log::info!(
        "[sync_full] Obsidian sync complete: {} notes -> {:?} ({} stale files cleared)",
        report.synced_count(),
        config.vault_path,
        cleared
    );
    Ok(report)
}

/// Sync only what the last commit touched
pub fn sync_diff(config: &SyncConfig, changes: &dyn CommitChanges) -> Result<SyncReport, String> {
    let deleted = changes.deleted_md_stems()?;
    let changed = changes.changed_md_files()?;

    let mut report = SyncReport::new(SyncMode::Diff);
    if deleted.is_empty() && changed.is_empty() {
        log::info!("[sync_diff] No changed .md files");
        return Ok(report);
    }

    ensure_vault(&config.vault_path)?;

    let excluded_stems = config.excluded_stems();
    for stem in deleted {
        let file = format!("{}.md", stem);
        if excluded_stems.contains(&stem) {
            report.record(FileOutcome::Skipped {
                file,
                reason: "excluded file".to_string(),
            });
            continue;
        }

        let dest_path = config.vault_path.join(&file);
        if !dest_path.exists() {
            continue;
        }
        match fs::remove_file(&dest_path) {
            Ok(()) => {
                log::info!("[sync_diff] Deleted {}", file);
                report.record(FileOutcome::Deleted { file });
            }
            Err(e) => report.record(FileOutcome::Failed {
                file,
                message: format!("Failed to delete: {}", e),
            }),
        }
    }

    for src_path in changed {
        let file_name = file_name_string(&src_path);
        if config.is_excluded_file(&file_name) {
            report.record(FileOutcome::Skipped {
                file: file_name,
                reason: "excluded file".to_string(),
            });
            continue;
        }

        let parent_name = src_path.parent().map(file_name_string).unwrap_or_default();
        if config.is_excluded_dir(&parent_name) {
            report.record(FileOutcome::Skipped {
                file: file_name,
                reason: format!("excluded directory {}", parent_name),
            });
            continue;
        }

        let outcome = sync_note(&config.vault_path, &src_path, &capitalize(&parent_name));
        if let FileOutcome::Synced { file } = &outcome {
            log::info!("[sync_diff] Synced {}", file);
        }
        report.record(outcome);
    }

    log::info!(
        "[sync_diff] Obsidian sync complete: {} changed, {} deleted",
        report.synced_count(),
        report.deleted_count()
    );
    Ok(report)
}
