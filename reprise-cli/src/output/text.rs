//! Plain text output formatter

use super::{MatchRow, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs each rendering under a short header
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_match(&mut self, row: &MatchRow) -> Result<()> {
        writeln!(
            self.writer,
            "[{} {}] chapter {}",
            row.book_id, row.prompt_id, row.chapter
        )?;
        write!(self.writer, "{}", row.match_text)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::row;

    #[test]
    fn test_text_layout() {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            formatter.format_match(&row("P1", 3)).unwrap();
            formatter.finish().unwrap();
        }

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "[alice P1] chapter 2\n\
             QUERY: DOWN THE RABBIT\n\
             REFER: DOWN THE RABBIT\n\
             WORDS:   3 CHARS:   13\n\n"
        );
    }
}
