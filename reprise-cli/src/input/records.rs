//! Model output records stored as JSON lines

use super::FileReader;
use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One model response to one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Identifier of the prompt template
    pub prompt_id: String,
    /// Generated text
    pub output: String,
    /// Prompt as sent to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_prompt: Option<String>,
}

/// Parse every non-blank line of `path` with `parse`
fn parse_lines<T>(path: &Path, parse: impl Fn(&str) -> serde_json::Result<T>) -> Result<Vec<T>> {
    let content = FileReader::read_text(path)?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse(line).map_err(|e| {
                anyhow::Error::from(CliError::InvalidRecord {
                    path: path.display().to_string(),
                    line: idx + 1,
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

/// Load typed model output records
pub fn load_records(path: &Path) -> Result<Vec<ModelOutput>> {
    parse_lines(path, |line| serde_json::from_str(line))
}

/// Load records as untyped JSON values, keeping unknown fields
pub fn load_raw_records(path: &Path) -> Result<Vec<Value>> {
    parse_lines(path, |line| serde_json::from_str(line))
}

/// Prompt identifier of an untyped record
pub fn prompt_id_of(record: &Value) -> Option<&str> {
    record.get("prompt_id").and_then(Value::as_str)
}

/// Overwrite `path` with one JSON record per line
pub fn write_records(path: &Path, records: &[Value]) -> Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("Failed to write: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
