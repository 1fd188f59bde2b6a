//! Input handling module

pub mod books;
pub mod file_reader;
pub mod records;

pub use books::{book_id_for, BookList};
pub use file_reader::FileReader;
pub use records::{load_raw_records, load_records, prompt_id_of, write_records, ModelOutput};

use crate::error::CliError;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Expand paths and glob patterns into a sorted list of distinct files
///
/// Every pattern must name at least one file; the error lists the ones that
/// did not.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    let mut unmatched = Vec::new();

    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        let mut matched = false;
        for entry in entries {
            let path = entry.with_context(|| format!("Error resolving pattern: {}", pattern))?;
            if path.is_file() {
                matched = true;
                files.insert(path);
            }
        }
        if !matched {
            unmatched.push(pattern.as_str());
        }
    }

    if !unmatched.is_empty() {
        return Err(CliError::FileNotFound(unmatched.join(", ")).into());
    }
    log::debug!("{} input files from {} patterns", files.len(), patterns.len());
    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_overlapping_patterns_are_merged() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.jsonl", "a.jsonl", "notes.txt"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }
        let pattern = format!("{}/*.jsonl", temp_dir.path().display());
        let literal = temp_dir.path().join("b.jsonl").display().to_string();

        let files = resolve_patterns(&[literal, pattern]).unwrap();
        assert_eq!(names(&files), vec!["a.jsonl", "b.jsonl"]);
    }

    #[test]
    fn test_directories_are_not_inputs() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("nested.jsonl")).unwrap();
        fs::write(temp_dir.path().join("moby.jsonl"), "").unwrap();

        let pattern = format!("{}/*.jsonl", temp_dir.path().display());
        assert_eq!(names(&resolve_patterns(&[pattern]).unwrap()), vec!["moby.jsonl"]);
    }

    #[test]
    fn test_unmatched_pattern_is_named() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("moby.jsonl"), "").unwrap();
        let found = format!("{}/*.jsonl", temp_dir.path().display());

        let err = resolve_patterns(&[found, "/nonexistent/*.jsonl".to_string()]).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::FileNotFound(missing)) => assert_eq!(missing, "/nonexistent/*.jsonl"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidPattern(_))
        ));
    }
}
