//! File reading utilities

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// File reader with BOM sniffing and encoding fallback
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    ///
    /// A byte order mark selects UTF-8 or UTF-16 and is removed. Invalid
    /// sequences are replaced rather than rejected.
    pub fn read_text(path: &Path) -> Result<String> {
        Self::read_text_with_encoding(path, "utf-8")
    }

    /// Read a file decoded with the encoding named by `label`
    ///
    /// A byte order mark still takes precedence over `label`.
    pub fn read_text_with_encoding(path: &Path, label: &str) -> Result<String> {
        let encoding = Encoding::for_label(label.as_bytes())
            .with_context(|| format!("Unknown encoding: {label}"))?;

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let (decoded, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            log::warn!(
                "{}: invalid {} sequences were replaced",
                path.display(),
                used.name()
            );
        }

        Ok(decoded.into_owned())
    }

    /// Get the modification time of a file
    pub fn modified(path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let content = "It was a bright cold day in April.";
        fs::write(&file_path, content).unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_text_strips_utf8_bom() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bom.txt");

        fs::write(&file_path, b"\xEF\xBB\xBFCaf\xC3\xA9").unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, "Café");
    }

    #[test]
    fn test_read_text_utf16_bom() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("utf16.txt");

        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Hi!".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&file_path, bytes).unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, "Hi!");
    }

    #[test]
    fn test_read_text_with_legacy_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("latin1.txt");

        fs::write(&file_path, b"na\xEFve").unwrap();

        let result = FileReader::read_text_with_encoding(&file_path, "windows-1252").unwrap();
        assert_eq!(result, "naïve");
    }

    #[test]
    fn test_unknown_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a.txt");
        fs::write(&file_path, "a").unwrap();

        let err = FileReader::read_text_with_encoding(&file_path, "klingon").unwrap_err();
        assert!(err.to_string().contains("Unknown encoding"));
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let path = Path::new("/nonexistent/file.txt");
        let result = FileReader::read_text(path);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read file"));
    }

    #[test]
    fn test_modified() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("stamp.txt");
        fs::write(&file_path, "x").unwrap();

        assert!(FileReader::modified(&file_path).is_ok());
        assert!(FileReader::modified(&temp_dir.path().join("missing")).is_err());
    }
}
