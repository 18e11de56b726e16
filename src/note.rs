//! Markdown note transformation for the Obsidian vault.
//!
//! A TIL note goes in as plain markdown and comes out with a generated header,
//! its leading `# Title` removed and relative `.md` links turned into wiki-links.

use crate::frontmatter::{self, NoteFrontmatter};
use crate::fsutil::file_stem_string;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Heading that introduces the sources section ("출처" = sources)
pub const SOURCES_HEADING: &str = "## 출처";

/// Title used when a note has no level-1 heading
pub const UNTITLED: &str = "Untitled";

/// `[text](./name.md)` or `[text](name.md)`; group 1 = text, group 2 = name
static INTERNAL_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((?:\./)?([\w\-]+)\.md\)").unwrap());

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());

/// Title line plus the blank lines after it; the title may be the last line
static TITLE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# .+(?:\n+|\z)").unwrap());

/// The sources heading line itself, up to (not including) its newline
static SOURCES_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?m)^{}[ \t]*\r?$", regex::escape(SOURCES_HEADING))).unwrap()
});

static EXTERNAL_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]\((https?://[^)]+)\)").unwrap());

/// First `# ` heading anywhere in the document, trimmed
pub fn extract_title(content: &str) -> String {
    TITLE_RE
        .captures(content)
        .map(|cap| cap[1].trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// http(s) link targets inside the sources section, in order, duplicates kept.
/// The section ends at the next `## ` heading line or at the end of the document.
pub fn extract_sources(content: &str) -> Vec<String> {
    let Some(heading) = SOURCES_SECTION_RE.find(content) else {
        return Vec::new();
    };

    let after_heading = &content[heading.end()..];
    let Some(section) = after_heading.strip_prefix('\n') else {
        return Vec::new();
    };
    let section = if section.starts_with("## ") {
        ""
    } else {
        match section.find("\n## ") {
            Some(end) => &section[..end],
            None => section,
        }
    };

    EXTERNAL_LINK_RE
        .captures_iter(section)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Names of notes linked through relative `.md` links, first occurrence order, no duplicates
pub fn extract_related_notes(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    INTERNAL_LINK_RE
        .captures_iter(content)
        .filter_map(|cap| {
            let name = cap[2].to_string();
            if seen.insert(name.clone()) {
                Some(name)
            } else {
                None
            }
        })
        .collect()
}

/// `[title](./name.md)` -> `[[name|title]]` for every occurrence
pub fn convert_internal_links(content: &str) -> String {
    INTERNAL_LINK_RE
        .replace_all(content, "[[${2}|${1}]]")
        .into_owned()
}

/// Remove the first `# ` heading line and the blank lines following it
pub fn strip_title_line(content: &str) -> String {
    TITLE_LINE_RE.replacen(content, 1, "").into_owned()
}

pub fn wiki_link(name: &str) -> String {
    format!("[[{}]]", name)
}

/// A note after extraction, ready to be rendered for the vault
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub title: String,
    pub sources: Vec<String>,
    /// Stems of linked notes
    pub related_notes: Vec<String>,
    /// Body with the title line removed and links converted
    pub body: String,
}

impl Note {
    /// Extract everything from raw file content (an existing header is discarded)
    pub fn parse(raw: &str) -> Self {
        let content = frontmatter::strip_existing(raw);

        let title = extract_title(content);
        let sources = extract_sources(content);
        let related_notes = extract_related_notes(content);

        let body = convert_internal_links(&strip_title_line(content));

        Self {
            title,
            sources,
            related_notes,
            body,
        }
    }

    pub fn frontmatter(&self, category: &str) -> NoteFrontmatter {
        NoteFrontmatter::new(
            &self.title,
            self.sources.clone(),
            category,
            self.related_notes.iter().map(|n| wiki_link(n)).collect(),
        )
    }

    /// Header followed by the body, separated by exactly one blank line
    pub fn render(&self, category: &str) -> String {
        let mut out = self.frontmatter(category).render();
        out.push_str(self.body.trim_start_matches('\n'));
        out
    }
}

/// Transform raw note content into its vault form
pub fn transform_content(raw: &str, category: &str) -> String {
    Note::parse(raw).render(category)
}

/// Read a note and transform it; returns (file stem, vault content)
pub fn process_note(src_path: &Path, category: &str) -> Result<(String, String), String> {
    let raw = fs::read_to_string(src_path)
        .map_err(|e| format!("Failed to read {:?}: {}", src_path, e))?;
    Ok((file_stem_string(src_path), transform_content(&raw, category)))
}
