//! README.md table of contents for the TIL repository.
//!
//! Every markdown note is listed under a category derived from its folder,
//! with its `# ` heading as the link text.

use crate::config::ReadmeConfig;
use crate::fsutil::{atomic_write_file, file_name_string, file_stem_string, title_case};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Category for notes directly under the root ("기타" = other)
pub const OTHER_CATEGORY: &str = "기타";

#[derive(Debug, Clone, PartialEq)]
pub struct ReadmeEntry {
    pub title: String,
    /// Path relative to the root, `/`-separated
    pub path: String,
}

/// Notes grouped by category; BTreeMap keeps categories in lexicographic order
#[derive(Debug, Default)]
pub struct ReadmeIndex {
    pub categories: BTreeMap<String, Vec<ReadmeEntry>>,
}

impl ReadmeIndex {
    pub fn total_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[derive(Debug)]
pub struct ReadmeSummary {
    pub total_count: usize,
    pub category_count: usize,
    pub output_path: PathBuf,
}

/// Title from the first `# ` line, or a title-cased file name if there is none
pub fn extract_title(file_path: &Path) -> String {
    match read_heading(file_path) {
        Ok(Some(title)) => return title,
        Ok(None) => {}
        Err(e) => log::warn!("[readme] Error reading {:?}: {}", file_path, e),
    }
    fallback_title(file_path)
}

fn read_heading(file_path: &Path) -> Result<Option<String>, String> {
    let file = fs::File::open(file_path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line.map_err(|e| e.to_string())?;
        if let Some(title) = line.trim().strip_prefix("# ") {
            return Ok(Some(title.trim().to_string()));
        }
    }
    Ok(None)
}

/// "rust-error_handling" -> "Rust Error Handling"
pub fn fallback_title(file_path: &Path) -> String {
    title_case(&file_stem_string(file_path).replace(['-', '_'], " "))
}

/// Category from the folders between the root and the file:
/// none -> "기타", one -> "go", two or more -> "go/concurrency"
pub fn category_for(relative_path: &Path) -> String {
    let folders: Vec<String> = relative_path
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();

    match folders.as_slice() {
        [] => OTHER_CATEGORY.to_string(),
        [first] => first.clone(),
        [first, second, ..] => format!("{}/{}", first, second),
    }
}

fn relative_display(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_listed(config: &ReadmeConfig, relative_path: &Path) -> bool {
    let file_name = file_name_string(relative_path);
    if file_name == config.output_name || file_name.starts_with('.') {
        return false;
    }
    if !file_name.ends_with(".md") {
        return false;
    }
    let top = relative_path
        .components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .unwrap_or_default();
    // A file directly under the root named like the excluded dir is still listed
    !(top == config.excluded_top_dir && relative_path.components().count() > 1)
}

/// Scan the note tree and group every listed note by category
pub fn collect_entries(config: &ReadmeConfig) -> ReadmeIndex {
    let mut index = ReadmeIndex::default();

    let walker = WalkDir::new(&config.til_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("[readme] Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative_path) = entry.path().strip_prefix(&config.til_root) else {
            continue;
        };
        if !is_listed(config, relative_path) {
            continue;
        }

        index
            .categories
            .entry(category_for(relative_path))
            .or_default()
            .push(ReadmeEntry {
                title: extract_title(entry.path()),
                path: relative_display(relative_path),
            });
    }

    for entries in index.categories.values_mut() {
        entries.sort_by_key(|e| e.title.to_lowercase());
    }
    index
}

/// Render the README; pieces are joined with "\n" on top of their own newlines
pub fn render_readme(index: &ReadmeIndex) -> String {
    let mut content: Vec<String> = Vec::new();
    content.push("# TIL (Today I Learned)\n".to_string());
    content.push("> 🤖 Learning with AI\n".to_string());

    content.push("\n## 📊 통계\n".to_string());
    content.push(format!("- 총 TIL 개수: **{}개**\n", index.total_count()));
    content.push(format!("- 카테고리 수: **{}개**\n", index.category_count()));

    if !index.categories.is_empty() {
        content.push("## 📚 카테고리\n".to_string());

        for (category, entries) in &index.categories {
            content.push(format!("### {}\n", category));
            for entry in entries {
                content.push(format!("- [{}]({})\n", entry.title, entry.path));
            }
            content.push("\n".to_string());
        }
    }

    content.push("---\n".to_string());
    content.push("## 📝 작성 규칙\n\n".to_string());
    content.push("- 폴더명은 소문자로 작성합니다\n".to_string());
    content.push("- 각 문서는 `# 제목`으로 시작합니다\n".to_string());
    content.push("- 카테고리별로 폴더를 구분합니다\n".to_string());
    content.push("- README는 자동으로 생성되므로 직접 수정하지 않습니다\n".to_string());

    content.join("\n")
}

/// Scan, render and overwrite README.md
pub fn generate_readme(config: &ReadmeConfig) -> Result<ReadmeSummary, String> {
    let index = collect_entries(config);
    let output_path = config.output_path();

    atomic_write_file(&output_path, render_readme(&index).as_bytes())?;

    let summary = ReadmeSummary {
        total_count: index.total_count(),
        category_count: index.category_count(),
        output_path,
    };
    log::info!(
        "[generate_readme] README.md generated: {} notes in {} categories",
        summary.total_count,
        summary.category_count
    );
    Ok(summary)
}
