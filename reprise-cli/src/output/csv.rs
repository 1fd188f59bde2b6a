//! CSV output formatter

use super::{MatchRow, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// CSV formatter - one row per match with a header line
pub struct CsvFormatter<W: Write> {
    writer: ::csv::Writer<W>,
    rows: usize,
}

const HEADER: [&str; 8] = [
    "book_id",
    "prompt_id",
    "word_count",
    "char_count",
    "skipped_chars_model",
    "skipped_chars_book",
    "chapter",
    "match_text",
];

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W) -> Self {
        let writer = ::csv::WriterBuilder::new()
            .has_headers(true)
            .quote_style(::csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Self { writer, rows: 0 }
    }
}

impl<W: Write + Send> OutputFormatter for CsvFormatter<W> {
    fn format_match(&mut self, row: &MatchRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // Headers are otherwise only written along with the first row
        if self.rows == 0 {
            self.writer.write_record(HEADER)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
