pub mod types;

pub use types::NoteFrontmatter;

/// Header delimiter line
pub const DELIMITER: &str = "---";

/// Drop a pre-existing header block from the start of the content.
///
/// The block must open with `---` and close with a line holding only `---`
/// (`\n` or `\r\n` terminated, or the last line of the file); without a
/// closing delimiter the content is returned untouched.
pub fn strip_existing(content: &str) -> &str {
    if !content.starts_with(DELIMITER) {
        return content;
    }

    let rest = &content[DELIMITER.len()..];
    let mut search_from = 0;
    while let Some(idx) = rest[search_from..].find("\n---") {
        let after = search_from + idx + "\n---".len();
        let tail = &rest[after..];
        if tail.is_empty() {
            return tail;
        }
        if let Some(body) = tail.strip_prefix('\n').or_else(|| tail.strip_prefix("\r\n")) {
            return body;
        }
        search_from = after;
    }
    content
}
