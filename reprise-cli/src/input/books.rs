//! Book list mapping book identifiers to reference text files

use super::FileReader;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Known books and where their texts live
#[derive(Debug, Clone, Default)]
pub struct BookList {
    books: BTreeMap<String, PathBuf>,
}

impl BookList {
    /// Load a JSON object of `book_id -> path`
    ///
    /// Relative paths are resolved against the directory of the list.
    pub fn load(path: &Path) -> Result<Self> {
        let content = FileReader::read_text(path)?;
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid book list: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let books = raw
            .into_iter()
            .map(|(id, book)| {
                let resolved = if book.is_absolute() {
                    book
                } else {
                    base.join(book)
                };
                (id, resolved)
            })
            .collect();

        Ok(Self { books })
    }

    /// Path of the text for `book_id`
    pub fn get(&self, book_id: &str) -> Option<&Path> {
        self.books.get(book_id).map(PathBuf::as_path)
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Paths of all book texts
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.books.values().map(PathBuf::as_path)
    }
}

/// Book identifier of a model output file: its file stem
pub fn book_id_for(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relative_paths_resolve_against_list() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("books.json");
        fs::write(
            &list,
            r#"{"alice": "texts/alice.txt", "abs": "/srv/books/abs.txt"}"#,
        )
        .unwrap();

        let books = BookList::load(&list).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(
            books.get("alice").unwrap(),
            temp_dir.path().join("texts/alice.txt")
        );
        assert_eq!(books.get("abs").unwrap(), Path::new("/srv/books/abs.txt"));
        assert!(books.get("missing").is_none());
    }

    #[test]
    fn test_invalid_list() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("books.json");
        fs::write(&list, "[1, 2]").unwrap();

        let err = BookList::load(&list).unwrap_err();
        assert!(err.to_string().contains("Invalid book list"));
    }

    #[test]
    fn test_book_id_for() {
        assert_eq!(
            book_id_for(Path::new("outputs/model-a/alice.jsonl")).as_deref(),
            Some("alice")
        );
    }
}
