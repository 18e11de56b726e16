#[cfg(test)]
use serde::{Deserialize, Deserializer};

// A single source is written as a scalar, several as a list
#[cfg(test)]
fn deserialize_source<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls,
        None => Vec::new(),
    })
}

/// Header injected at the top of every note written to the vault.
///
/// Only tests read a rendered header back (to check it parses as YAML).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(Deserialize))]
pub struct NoteFrontmatter {
    pub title: String,
    /// URLs from the "## 출처" section
    #[cfg_attr(test, serde(default, deserialize_with = "deserialize_source"))]
    pub source: Vec<String>,
    /// Single category, e.g. "Rust"
    pub topics: Vec<String>,
    /// Wiki-links to other notes, e.g. "[[ownership]]"
    #[cfg_attr(test, serde(default))]
    pub related_notes: Vec<String>,
    pub tags: Vec<String>,
}

/// Tag appended to every synced note
pub const TIL_TAG: &str = "TIL";

impl NoteFrontmatter {
    pub fn new(title: &str, sources: Vec<String>, topic: &str, related_notes: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            source: sources,
            topics: vec![topic.to_string()],
            related_notes,
            tags: vec![topic.to_lowercase(), TIL_TAG.to_string()],
        }
    }

    /// Render the header block, closing delimiter plus one blank line included.
    ///
    /// Written by hand rather than through serde_yaml so the layout stays fixed
    /// (scalar `source` for a single URL, quoted wiki-links). The title is
    /// embedded verbatim; embedded double quotes are not escaped.
    pub fn render(&self) -> String {
        let mut lines = vec!["---".to_string()];
        lines.push(format!("title: \"{}\"", self.title));

        match self.source.as_slice() {
            [] => {}
            [only] => lines.push(format!("source: {}", only)),
            many => {
                lines.push("source:".to_string());
                lines.extend(many.iter().map(|src| format!("  - {}", src)));
            }
        }

        lines.push("topics:".to_string());
        lines.extend(self.topics.iter().map(|t| format!("  - {}", t)));

        if !self.related_notes.is_empty() {
            lines.push("related_notes:".to_string());
            lines.extend(self.related_notes.iter().map(|n| format!("  - \"{}\"", n)));
        }

        lines.push("tags:".to_string());
        lines.extend(self.tags.iter().map(|t| format!("  - {}", t)));

        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(String::new());
        lines.join("\n")
    }
}
