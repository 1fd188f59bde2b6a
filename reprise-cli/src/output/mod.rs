//! Output formatting module

use anyhow::Result;
use reprise_core::ReportedMatch;
use serde::{Deserialize, Serialize};
use std::io::Write;

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;

pub use self::csv::CsvFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// One reported match of one model output against one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    /// Book identifier
    pub book_id: String,
    /// Prompt identifier
    pub prompt_id: String,
    /// Matched words
    pub word_count: usize,
    /// Matched characters
    pub char_count: usize,
    /// Characters skipped in the model output
    pub skipped_chars_model: usize,
    /// Characters skipped in the book
    pub skipped_chars_book: usize,
    /// Chapter of the book where the match starts
    pub chapter: usize,
    /// Rendering of the match
    pub match_text: String,
}

impl MatchRow {
    /// Build a row from a reported match
    pub fn new(book_id: &str, prompt_id: &str, found: &ReportedMatch) -> Self {
        Self {
            book_id: book_id.to_string(),
            prompt_id: prompt_id.to_string(),
            word_count: found.word_count(),
            char_count: found.char_count(),
            skipped_chars_model: found.skipped_query_chars(),
            skipped_chars_book: found.skipped_reference_chars(),
            chapter: found.chapter().number(),
            match_text: found.rendering().to_string(),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format and output a single match row
    fn format_match(&mut self, row: &MatchRow) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV table with one row per match
    Csv,
    /// JSON array of match rows
    Json,
    /// Plain text renderings
    Text,
    /// Markdown report grouped by prompt
    Markdown,
}

impl OutputFormat {
    /// Parse a format name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "text" | "txt" => Some(Self::Text),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<W>(format: OutputFormat, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
where
    W: Write + Send + 'static,
{
    match format {
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::MatchRow;

    pub fn row(prompt_id: &str, words: usize) -> MatchRow {
        MatchRow {
            book_id: "alice".to_string(),
            prompt_id: prompt_id.to_string(),
            word_count: words,
            char_count: words * 4,
            skipped_chars_model: 0,
            skipped_chars_book: 3,
            chapter: 2,
            match_text: "QUERY: DOWN THE RABBIT\nREFER: DOWN THE RABBIT\nWORDS:   3 CHARS:   13\n"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reprise_core::{Comparator, MatchConfig, ReferenceText};

    #[test]
    fn test_row_from_reported_match() {
        let book = ReferenceText::parse("a\n###CHAPTER###\nthe quick brown fox jumps").unwrap();
        let comparator = Comparator::new(MatchConfig::builder().min_length_words(3).build().unwrap());
        let found = comparator.compare("quick brown fox", &book);

        let row = MatchRow::new("fables", "P7", &found[0]);
        assert_eq!(row.book_id, "fables");
        assert_eq!(row.prompt_id, "P7");
        assert_eq!(row.word_count, 3);
        assert_eq!(row.char_count, 13);
        assert_eq!(row.chapter, 2);
        assert!(row.match_text.starts_with("QUERY: QUICK BROWN FOX\n"));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_name("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }
}
