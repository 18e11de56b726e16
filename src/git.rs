//! Files touched by the most recent commit, as reported by `git diff-tree`.

use crate::fsutil::file_stem_string;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of the last commit's markdown changes
pub trait CommitChanges {
    /// `.md` files added or modified by the last commit that still exist on disk
    fn changed_md_files(&self) -> Result<Vec<PathBuf>, String>;

    /// Stems of `.md` files deleted by the last commit
    fn deleted_md_stems(&self) -> Result<Vec<String>, String>;
}

/// Queries the `git` executable inside the repository root
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// `git diff-tree --no-commit-id --name-only -r [extra] HEAD`
    ///
    /// `core.quotepath=false` keeps non-ASCII names (Hangul note names) as raw
    /// UTF-8 instead of quoted octal escapes.
    fn diff_tree(&self, extra: &[&str]) -> Result<String, String> {
        let mut args = vec!["-c", "core.quotepath=false", "diff-tree", "--no-commit-id", "--name-only", "-r"];
        args.extend_from_slice(extra);
        args.push("HEAD");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| format!("Failed to run git: {}", e))?;

        if !output.status.success() {
            log::warn!(
                "[git] `git {}` exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl CommitChanges for GitCli {
    fn changed_md_files(&self) -> Result<Vec<PathBuf>, String> {
        let stdout = self.diff_tree(&[])?;
        Ok(existing_md_paths(&self.repo_root, &parse_name_only(&stdout)))
    }

    fn deleted_md_stems(&self) -> Result<Vec<String>, String> {
        let stdout = self.diff_tree(&["--diff-filter=D"])?;
        Ok(md_stems(&parse_name_only(&stdout)))
    }
}

/// Repository-relative `.md` paths from `--name-only` output
pub fn parse_name_only(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && line.ends_with(".md"))
        .map(str::to_string)
        .collect()
}

/// Resolve relative paths under the root, keeping only those that still exist
pub fn existing_md_paths(root: &Path, relative: &[String]) -> Vec<PathBuf> {
    relative
        .iter()
        .map(|rel| root.join(rel))
        .filter(|path| path.exists())
        .collect()
}

pub fn md_stems(relative: &[String]) -> Vec<String> {
    relative.iter().map(|rel| file_stem_string(Path::new(rel))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_name_only_filters_markdown() {
        let stdout = "rust/ownership.md\nscripts/generate_readme.py\n\ngo/goroutine.md\nREADME.md\n";
        assert_eq!(
            parse_name_only(stdout),
            vec!["rust/ownership.md", "go/goroutine.md", "README.md"]
        );
    }

    #[test]
    fn test_parse_name_only_empty_output() {
        assert!(parse_name_only("").is_empty());
        assert!(parse_name_only("\n").is_empty());
    }

    #[test]
    fn test_md_stems() {
        let relative = vec!["rust/ownership.md".to_string(), "top.md".to_string()];
        assert_eq!(md_stems(&relative), vec!["ownership", "top"]);
    }

    #[test]
    fn test_existing_md_paths_drops_missing() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("rust")).unwrap();
        fs::write(temp_dir.path().join("rust/kept.md"), "# Kept").unwrap();

        let relative = vec!["rust/kept.md".to_string(), "rust/gone.md".to_string()];
        let paths = existing_md_paths(temp_dir.path(), &relative);
        assert_eq!(paths, vec![temp_dir.path().join("rust/kept.md")]);
    }
}
