//! Run configuration for the sync and README tools.
//!
//! Exclusions are fixed constants; only the root and vault paths vary, so tests
//! can point both tools at temporary trees.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Vault folder relative to the user's home directory (iCloud-synced Obsidian vault)
pub const VAULT_RELATIVE_PATH: &str =
    "Library/Mobile Documents/iCloud~md~obsidian/Documents/Note/09.TIL";

/// Files that are never synced to the vault
pub const EXCLUDE_FILES: [&str; 2] = ["README.md", "CLAUDE.md"];

/// Directories that are never synced to the vault
pub const EXCLUDE_DIRS: [&str; 6] = [".git", ".github", ".githooks", ".claude", "scripts", ".reviews"];

/// Generated index file name
pub const README_NAME: &str = "README.md";

/// Top-level directory skipped by the README scan
pub const README_EXCLUDED_DIR: &str = "scripts";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Root of the TIL repository (topic folders live directly under it)
    pub til_root: PathBuf,
    /// Destination vault folder
    pub vault_path: PathBuf,
    pub exclude_files: BTreeSet<String>,
    pub exclude_dirs: BTreeSet<String>,
}

impl SyncConfig {
    pub fn new(til_root: impl Into<PathBuf>, vault_path: impl Into<PathBuf>) -> Self {
        Self {
            til_root: til_root.into(),
            vault_path: vault_path.into(),
            exclude_files: EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Current directory as the TIL root, `$HOME/<VAULT_RELATIVE_PATH>` as the vault
    pub fn from_env() -> Result<Self, String> {
        let til_root = current_root()?;
        let home = std::env::var_os("HOME").ok_or("HOME is not set; cannot locate the vault")?;
        Ok(Self::new(til_root, Path::new(&home).join(VAULT_RELATIVE_PATH)))
    }

    pub fn is_excluded_file(&self, file_name: &str) -> bool {
        self.exclude_files.contains(file_name)
    }

    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.contains(dir_name)
    }

    /// Stems of excluded files ("README.md" -> "README"), used to filter deletions
    pub fn excluded_stems(&self) -> BTreeSet<String> {
        self.exclude_files
            .iter()
            .map(|f| f.trim_end_matches(".md").to_string())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ReadmeConfig {
    pub til_root: PathBuf,
    pub output_name: String,
    pub excluded_top_dir: String,
}

impl ReadmeConfig {
    pub fn new(til_root: impl Into<PathBuf>) -> Self {
        Self {
            til_root: til_root.into(),
            output_name: README_NAME.to_string(),
            excluded_top_dir: README_EXCLUDED_DIR.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(current_root()?))
    }

    pub fn output_path(&self) -> PathBuf {
        self.til_root.join(&self.output_name)
    }
}

fn current_root() -> Result<PathBuf, String> {
    std::env::current_dir().map_err(|e| format!("Failed to resolve current directory: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let config = SyncConfig::new("/til", "/vault");
        assert!(config.is_excluded_file("README.md"));
        assert!(config.is_excluded_file("CLAUDE.md"));
        assert!(!config.is_excluded_file("notes.md"));
        assert!(config.is_excluded_dir(".git"));
        assert!(config.is_excluded_dir("scripts"));
        assert!(!config.is_excluded_dir("rust"));
    }

    #[test]
    fn test_excluded_stems() {
        let config = SyncConfig::new("/til", "/vault");
        let stems = config.excluded_stems();
        assert!(stems.contains("README"));
        assert!(stems.contains("CLAUDE"));
        assert_eq!(stems.len(), 2);
    }

    #[test]
    fn test_readme_output_path() {
        let config = ReadmeConfig::new("/til");
        assert_eq!(config.output_path(), PathBuf::from("/til/README.md"));
        assert_eq!(config.excluded_top_dir, "scripts");
    }
}
