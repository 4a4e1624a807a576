//! File helpers shared by commands and the hand store.
//!
//! - Reading JSONL text with the UTF-8 BOM stripped
//! - Ensuring parent directories exist before file writes

use std::path::Path;

/// Read a text file, stripping a leading UTF-8 BOM if present.
///
/// # Example
///
/// ```rust,no_run
/// # use holdem_cli::io_utils::read_text;
/// let content = read_text("data/hands.jsonl").unwrap();
/// ```
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let mut content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// ```rust,no_run
/// use std::path::Path;
/// # use holdem_cli::io_utils::ensure_parent_dir;
///
/// ensure_parent_dir(Path::new("data/hands.sqlite")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
