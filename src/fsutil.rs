use std::fs;
use std::io::Write;
use std::path::Path;

/// Atomic file write: write to a temp file in the same directory, then rename.
/// The vault lives in an iCloud-synced folder; a file truncated by `File::create`
/// and picked up mid-write would be synced to every device in its broken state.
pub fn atomic_write_file(path: &Path, content: &[u8]) -> Result<(), String> {
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = path.with_file_name(format!("{}.til-tmp", file_name));

    let mut file = fs::File::create(&temp_path)
        .map_err(|e| format!("Failed to create temp file {:?}: {}", temp_path, e))?;
    file.write_all(content)
        .map_err(|e| format!("Failed to write temp file {:?}: {}", temp_path, e))?;
    file.sync_all()
        .map_err(|e| format!("Failed to sync temp file {:?}: {}", temp_path, e))?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(format!("Failed to rename {:?} -> {:?}: {}", temp_path, path, e));
    }

    Ok(())
}

/// Upper-case the first character, lower-case the rest ("rust" / "RUST" -> "Rust")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-case every alphabetic run: a letter after a non-letter is upper-cased,
/// any other letter lower-cased ("go_2024tips" -> "Go_2024Tips")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// File name of a path as an owned string ("" when the path has none)
pub fn file_name_string(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}

/// File stem of a path as an owned string ("" when the path has none)
pub fn file_stem_string(path: &Path) -> String {
    path.file_stem().unwrap_or_default().to_string_lossy().to_string()
}
