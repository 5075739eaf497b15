// Utility helpers
// Filesystem plumbing shared by the command layer and the CLI

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read one chapter file as UTF-8 text
pub fn read_chapter_file(file_path: &str) -> Result<String> {
    if !Path::new(file_path).exists() {
        bail!("chapter file not found: {}", file_path);
    }

    fs::read_to_string(file_path)
        .with_context(|| format!("failed to read chapter file: {}", file_path))
}

/// Display name for a chapter file: the stem of the file name
pub fn chapter_display_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_chapter_file() {
        let result = read_chapter_file("/no/such/dir/chapter01.txt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_chapter_display_name() {
        assert_eq!(chapter_display_name("content/chapter01.txt"), "chapter01");
        assert_eq!(chapter_display_name("notes.md"), "notes");
    }
}
