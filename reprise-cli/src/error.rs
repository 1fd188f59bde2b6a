//! Error handling for the CLI application

use thiserror::Error;

/// CLI-specific failures
#[derive(Debug, Error)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Model output file whose book is not in the book list
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// Malformed model output record
    #[error("Invalid record at {path}:{line}: {message}")]
    InvalidRecord {
        /// File holding the record
        path: String,
        /// 1-based line number
        line: usize,
        /// Parser message
        message: String,
    },
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("book.txt".to_string());
        assert_eq!(error.to_string(), "File not found: book.txt");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("max_gap_words must be at most 8".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: max_gap_words must be at most 8"
        );
    }

    #[test]
    fn test_unknown_book_display() {
        let error = CliError::UnknownBook("moby-dick".to_string());
        assert_eq!(error.to_string(), "Unknown book: moby-dick");
    }

    #[test]
    fn test_invalid_record_display() {
        let error = CliError::InvalidRecord {
            path: "out/alice.jsonl".to_string(),
            line: 3,
            message: "missing field `output`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid record at out/alice.jsonl:3: missing field `output`"
        );
    }

    #[test]
    fn test_cli_result_wraps_cli_error() {
        let failure: CliResult<()> = Err(CliError::UnknownBook("x".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
