//! Markdown output formatter

use super::{MatchRow, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one section per model output, renderings as code blocks
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    current: Option<(String, String)>,
    match_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: None,
            match_count: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_match(&mut self, row: &MatchRow) -> Result<()> {
        let key = (row.book_id.clone(), row.prompt_id.clone());
        if self.current.as_ref() != Some(&key) {
            writeln!(self.writer, "## {} / {}", row.book_id, row.prompt_id)?;
            writeln!(self.writer)?;
            self.current = Some(key);
        }

        self.match_count += 1;
        writeln!(
            self.writer,
            "{}. Chapter {}, {} words, {} characters",
            self.match_count, row.chapter, row.word_count, row.char_count
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "```")?;
        write!(self.writer, "{}", row.match_text)?;
        writeln!(self.writer, "```")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total matches: {}*", self.match_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
