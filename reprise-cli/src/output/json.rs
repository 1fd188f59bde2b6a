//! JSON output formatter

use super::{MatchRow, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs match rows as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    rows: Vec<MatchRow>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
            pretty: true,
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_match(&mut self, row: &MatchRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.rows)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::row;

    #[test]
    fn test_json_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer).pretty(false);
            formatter.format_match(&row("P1", 3)).unwrap();
            formatter.format_match(&row("P2", 9)).unwrap();
            formatter.finish().unwrap();
        }

        let parsed: Vec<MatchRow> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, vec![row("P1", 3), row("P2", 9)]);
        assert_eq!(buffer.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_empty_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer);
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
